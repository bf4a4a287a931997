//! The authoritative in-memory application state and its transitions.
//!
//! `AppState` is the single aggregate the whole product reads and writes.
//! Every mutation goes through `reduce`, which is a total, pure function:
//! transitions aimed at unknown ids leave the state unchanged instead of
//! failing. `StateStore` wraps the current state with dispatch/subscribe so
//! persistence and UI layers observe changes without owning the state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe_parser::{Ingredient, Recipe, RegionFilter};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TodoCategory {
    Prep,
    Shopping,
    Cooking,
    #[default]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: TodoCategory,
    /// Weak back-reference into `saved_recipes`. A deleted recipe leaves
    /// this dangling on purpose; lookups just miss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

/// The unit of persistence. Field defaults double as the shallow-merge
/// policy for documents written by older builds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub sessions: Vec<ChatSession>,
    pub current_session_id: Option<String>,
    pub todos: Vec<TodoItem>,
    pub saved_recipes: Vec<Recipe>,
    pub selected_region: RegionFilter,
}

/// Message content before the store assigns identity and a timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Clone)]
pub enum Action {
    CreateSession { session: ChatSession },
    SetCurrentSession { session_id: Option<String> },
    DeleteSession { session_id: String },
    AppendMessage { session_id: String, message: Message },
    AddTodos { todos: Vec<TodoItem> },
    ToggleTodo { todo_id: String },
    DeleteTodo { todo_id: String },
    ClearCompletedTodos,
    SaveRecipe { recipe: Recipe },
    UnsaveRecipe { recipe_id: String },
    SetSelectedRegion { filter: RegionFilter },
}

fn default_title(created_at: DateTime<Utc>) -> String {
    created_at.format("%b %d, %Y").to_string()
}

const TITLE_EXCERPT_CHARS: usize = 40;

fn title_excerpt(content: &str) -> String {
    let trimmed = content.trim();
    let mut excerpt: String = trimmed.chars().take(TITLE_EXCERPT_CHARS).collect();
    if trimmed.chars().count() > TITLE_EXCERPT_CHARS {
        excerpt.push('…');
    }
    excerpt
}

/// Shopping-list line for one ingredient: `"{amount} {unit} {name} ({notes})"`
/// with empty pieces and doubled whitespace collapsed away.
pub fn format_shopping_entry(ingredient: &Ingredient) -> String {
    let mut text = format!(
        "{} {} {}",
        ingredient.amount, ingredient.unit, ingredient.name
    );
    if let Some(notes) = ingredient.notes.as_deref() {
        if !notes.trim().is_empty() {
            text.push_str(&format!(" ({})", notes.trim()));
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Applies one transition. Total: unknown targets are no-ops.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::CreateSession { session } => {
            state.current_session_id = Some(session.id.clone());
            state.sessions.push(session);
        }
        Action::SetCurrentSession { session_id } => match session_id {
            None => state.current_session_id = None,
            Some(id) if state.sessions.iter().any(|s| s.id == id) => {
                state.current_session_id = Some(id);
            }
            Some(_) => {}
        },
        Action::DeleteSession { session_id } => {
            state.sessions.retain(|s| s.id != session_id);
            if state.current_session_id.as_deref() == Some(session_id.as_str()) {
                state.current_session_id = state
                    .sessions
                    .iter()
                    .max_by_key(|s| s.updated_at)
                    .map(|s| s.id.clone());
            }
        }
        Action::AppendMessage {
            session_id,
            message,
        } => {
            if let Some(session) = state.sessions.iter_mut().find(|s| s.id == session_id) {
                let first_user_message = message.role == Role::User
                    && !session.messages.iter().any(|m| m.role == Role::User);
                if first_user_message && session.title == default_title(session.created_at) {
                    session.title = title_excerpt(&message.content);
                }
                session.updated_at = message.timestamp;
                session.messages.push(message);
            }
        }
        Action::AddTodos { todos } => {
            state.todos.extend(todos);
        }
        Action::ToggleTodo { todo_id } => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == todo_id) {
                todo.completed = !todo.completed;
            }
        }
        Action::DeleteTodo { todo_id } => {
            state.todos.retain(|t| t.id != todo_id);
        }
        Action::ClearCompletedTodos => {
            state.todos.retain(|t| !t.completed);
        }
        Action::SaveRecipe { recipe } => {
            if !state.saved_recipes.iter().any(|r| r.id == recipe.id) {
                state.saved_recipes.push(recipe);
            }
        }
        Action::UnsaveRecipe { recipe_id } => {
            state.saved_recipes.retain(|r| r.id != recipe_id);
        }
        Action::SetSelectedRegion { filter } => {
            state.selected_region = filter;
        }
    }
    state
}

type Listener = Box<dyn Fn(&AppState) + Send>;

/// Owns the current `AppState` and funnels every mutation through `reduce`.
pub struct StateStore {
    state: AppState,
    listeners: Vec<Listener>,
}

impl StateStore {
    pub fn new(initial: AppState) -> Self {
        StateStore {
            state: initial,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Registers a listener invoked after every dispatch with the new state.
    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, action: Action) -> &AppState {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        for listener in &self.listeners {
            listener(&self.state);
        }
        &self.state
    }

    /// Appends a new session (current afterwards) and returns its id.
    pub fn create_session(&mut self, title: Option<String>) -> String {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::new_v4().to_string(),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| default_title(now)),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let session_id = session.id.clone();
        self.dispatch(Action::CreateSession { session });
        session_id
    }

    pub fn set_current_session(&mut self, session_id: Option<String>) {
        self.dispatch(Action::SetCurrentSession { session_id });
    }

    pub fn delete_session(&mut self, session_id: &str) {
        self.dispatch(Action::DeleteSession {
            session_id: session_id.to_string(),
        });
    }

    /// Assigns id and timestamp, then appends. Returns the message id; the
    /// append itself is a no-op if the session does not exist.
    pub fn append_message(&mut self, session_id: &str, new_message: NewMessage) -> String {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            role: new_message.role,
            content: new_message.content,
            timestamp: Utc::now(),
            recipe: new_message.recipe,
        };
        let message_id = message.id.clone();
        self.dispatch(Action::AppendMessage {
            session_id: session_id.to_string(),
            message,
        });
        message_id
    }

    pub fn add_todo(
        &mut self,
        text: String,
        category: TodoCategory,
        recipe_id: Option<String>,
    ) -> String {
        let todo = TodoItem {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            category,
            recipe_id,
        };
        let todo_id = todo.id.clone();
        self.dispatch(Action::AddTodos { todos: vec![todo] });
        todo_id
    }

    pub fn toggle_todo(&mut self, todo_id: &str) {
        self.dispatch(Action::ToggleTodo {
            todo_id: todo_id.to_string(),
        });
    }

    pub fn delete_todo(&mut self, todo_id: &str) {
        self.dispatch(Action::DeleteTodo {
            todo_id: todo_id.to_string(),
        });
    }

    pub fn clear_completed_todos(&mut self) {
        self.dispatch(Action::ClearCompletedTodos);
    }

    /// Idempotent by recipe id.
    pub fn save_recipe(&mut self, recipe: Recipe) {
        self.dispatch(Action::SaveRecipe { recipe });
    }

    pub fn unsave_recipe(&mut self, recipe_id: &str) {
        self.dispatch(Action::UnsaveRecipe {
            recipe_id: recipe_id.to_string(),
        });
    }

    /// One shopping todo per usable ingredient, back-referencing the recipe.
    /// A recipe without usable ingredients adds nothing and touches nothing.
    pub fn add_shopping_list_from_recipe(&mut self, recipe: &Recipe) -> usize {
        let todos: Vec<TodoItem> = recipe
            .ingredients
            .iter()
            .filter(|i| !i.name.trim().is_empty())
            .map(|ingredient| TodoItem {
                id: Uuid::new_v4().to_string(),
                text: format_shopping_entry(ingredient),
                completed: false,
                category: TodoCategory::Shopping,
                recipe_id: Some(recipe.id.clone()),
            })
            .collect();
        let added = todos.len();
        if added > 0 {
            self.dispatch(Action::AddTodos { todos });
        }
        added
    }

    pub fn set_selected_region(&mut self, filter: RegionFilter) {
        self.dispatch(Action::SetSelectedRegion { filter });
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        let current_id = self.state.current_session_id.as_deref()?;
        self.state.sessions.iter().find(|s| s.id == current_id)
    }
}
