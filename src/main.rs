use anyhow::{Context, Result};
use std::env;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

use recipe_chat::api_connection::endpoints::ChatMessage;
use recipe_chat::chat;
use recipe_chat::cli::parse_args;
use recipe_chat::cooking::nutrition::NutritionTable;
use recipe_chat::cooking::scaling::scale_recipe;
use recipe_chat::cooking::units;
use recipe_chat::recipe_parser::{Recipe, Region, RegionFilter};
use recipe_chat::state_store::{
    format_shopping_entry, NewMessage, Role, StateStore, TodoCategory,
};
use recipe_chat::storage::{spawn_write_behind, FileStore, PersistenceGateway};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env for the API key
    env_logger::init();

    let cli_args = parse_args();

    let file_store = Arc::new(FileStore::new(&cli_args.data_dir));
    let gateway = Arc::new(PersistenceGateway::new(file_store));

    let initial_state = gateway.load().await;
    println!(
        "Loaded {} session(s), {} saved recipe(s), {} todo(s) from {:?}.",
        initial_state.sessions.len(),
        initial_state.saved_recipes.len(),
        initial_state.todos.len(),
        cli_args.data_dir
    );

    let mut store = StateStore::new(initial_state);
    if let Some(region_arg) = &cli_args.region {
        match parse_region_arg(region_arg) {
            Some(filter) => store.set_selected_region(filter),
            None => eprintln!("Unknown region '{}', keeping previous filter.", region_arg),
        }
    }

    let nutrition = match &cli_args.nutrition_csv {
        Some(path) => NutritionTable::from_csv(path)
            .with_context(|| format!("Failed to load nutrition table from {:?}", path))?,
        None => NutritionTable::built_in(),
    };

    let (state_tx, writer) = spawn_write_behind(gateway.clone(), store.state().clone());
    store.subscribe(move |state| {
        let _ = state_tx.send(state.clone());
    });

    let mut credential = env::var(&cli_args.api_key_env)
        .ok()
        .filter(|v| !v.trim().is_empty());
    if credential.is_none() {
        credential = gateway.load_credential().await;
    }
    match &credential {
        Some(_) => println!("Live chat enabled."),
        None => println!(
            "No API key in ${} and none cached; running in offline demo mode.",
            cli_args.api_key_env
        ),
    }
    println!("Chatting about {} cuisine. Type a message, or :help for commands.\n", store.state().selected_region.label());

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if !line.starts_with(':') {
            send_message(&line, &mut store, &credential, &cli_args.model).await;
            continue;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim).unwrap_or("");

        match command {
            ":quit" | ":q" | ":exit" => break,
            ":help" => print_help(),
            ":new" => {
                let title = (!arg.is_empty()).then(|| arg.to_string());
                store.create_session(title);
                println!("Started a new conversation.");
            }
            ":sessions" => {
                let state = store.state();
                if state.sessions.is_empty() {
                    println!("No conversations yet.");
                }
                for (i, session) in state.sessions.iter().enumerate() {
                    let marker = if state.current_session_id.as_deref() == Some(session.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{} {}. {} ({} messages)",
                        marker,
                        i + 1,
                        session.title,
                        session.messages.len()
                    );
                }
            }
            ":open" => match indexed(arg, store.state().sessions.len()) {
                Some(i) => {
                    let session = &store.state().sessions[i];
                    let (id, title) = (session.id.clone(), session.title.clone());
                    store.set_current_session(Some(id));
                    println!("Switched to \"{}\".", title);
                }
                None => println!("Usage: :open <conversation number>"),
            },
            ":delete" => match indexed(arg, store.state().sessions.len()) {
                Some(i) => {
                    let id = store.state().sessions[i].id.clone();
                    store.delete_session(&id);
                    println!("Conversation deleted.");
                }
                None => println!("Usage: :delete <conversation number>"),
            },
            ":save" => match last_conversation_recipe(&store) {
                Some(recipe) => {
                    println!("Saved \"{}\".", recipe.name);
                    store.save_recipe(recipe);
                }
                None => println!("No recipe in the current conversation yet."),
            },
            ":recipes" => {
                let state = store.state();
                if state.saved_recipes.is_empty() {
                    println!("No saved recipes. Use :save after the assistant shares one.");
                }
                for (i, recipe) in state.saved_recipes.iter().enumerate() {
                    println!(
                        "{}. {} ({} · serves {})",
                        i + 1,
                        recipe.name,
                        recipe.region.label(),
                        recipe.servings
                    );
                }
            }
            ":unsave" => match indexed(arg, store.state().saved_recipes.len()) {
                Some(i) => {
                    let id = store.state().saved_recipes[i].id.clone();
                    store.unsave_recipe(&id);
                    println!("Recipe removed.");
                }
                None => println!("Usage: :unsave <recipe number> (see :recipes)"),
            },
            ":shop" => {
                let recipe = if arg.is_empty() {
                    last_conversation_recipe(&store)
                } else {
                    indexed(arg, store.state().saved_recipes.len())
                        .map(|i| store.state().saved_recipes[i].clone())
                };
                match recipe {
                    Some(recipe) if recipe.has_usable_ingredients() => {
                        let added = store.add_shopping_list_from_recipe(&recipe);
                        println!("Added {} item(s) to your shopping list.", added);
                    }
                    Some(_) => println!("That recipe has no ingredients to add."),
                    None => println!("Usage: :shop [recipe number] (see :recipes)"),
                }
            }
            ":todos" => {
                let todos = &store.state().todos;
                if todos.is_empty() {
                    println!("Nothing on the list.");
                }
                for (i, todo) in todos.iter().enumerate() {
                    let check = if todo.completed { "x" } else { " " };
                    println!(
                        "[{}] {}. ({}) {}",
                        check,
                        i + 1,
                        category_label(todo.category),
                        todo.text
                    );
                }
            }
            ":done" => match indexed(arg, store.state().todos.len()) {
                Some(i) => {
                    let id = store.state().todos[i].id.clone();
                    store.toggle_todo(&id);
                }
                None => println!("Usage: :done <todo number>"),
            },
            ":deltodo" => match indexed(arg, store.state().todos.len()) {
                Some(i) => {
                    let id = store.state().todos[i].id.clone();
                    store.delete_todo(&id);
                }
                None => println!("Usage: :deltodo <todo number>"),
            },
            ":cleardone" => {
                store.clear_completed_todos();
                println!("Cleared completed todos.");
            }
            ":region" => match parse_region_arg(arg) {
                Some(filter) => {
                    store.set_selected_region(filter);
                    println!("Now browsing {} cuisine.", filter.label());
                }
                None => {
                    let labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
                    println!("Usage: :region <all | {}>", labels.join(" | "));
                }
            },
            ":scale" => {
                let mut args = arg.split_whitespace();
                let index = args.next().and_then(|a| indexed(a, store.state().saved_recipes.len()));
                let servings = args.next().and_then(|a| a.parse::<u32>().ok());
                match (index, servings) {
                    (Some(i), Some(servings)) => {
                        let scaled = scale_recipe(&store.state().saved_recipes[i], servings);
                        print_recipe(&scaled);
                    }
                    _ => println!("Usage: :scale <recipe number> <servings>"),
                }
            }
            ":nutrition" => {
                let recipe = if arg.is_empty() {
                    last_conversation_recipe(&store)
                } else {
                    indexed(arg, store.state().saved_recipes.len())
                        .map(|i| store.state().saved_recipes[i].clone())
                };
                match recipe {
                    Some(recipe) => print_nutrition(&nutrition, &recipe),
                    None => println!("Usage: :nutrition [recipe number] (see :recipes)"),
                }
            }
            ":sub" => {
                if arg.is_empty() {
                    println!("Usage: :sub <ingredient>");
                } else {
                    match units::substitutions_for(arg) {
                        Some(options) => {
                            println!("Instead of {}, try:", arg);
                            for option in options {
                                println!("  - {}", option);
                            }
                        }
                        None => println!("No substitution suggestions for \"{}\".", arg),
                    }
                }
            }
            ":convert" => {
                let tokens: Vec<&str> = arg.split_whitespace().filter(|t| *t != "to").collect();
                let converted = match tokens.as_slice() {
                    [amount, from, to] => units::parse_amount(amount)
                        .and_then(|value| units::convert(value, from, to))
                        .map(|result| (amount.to_string(), *from, *to, result)),
                    _ => None,
                };
                match converted {
                    Some((amount, from, to, result)) => {
                        println!("{} {} = {:.2} {}", amount, from, result, to)
                    }
                    None => println!("Usage: :convert <amount> <from> <to>  (e.g. :convert 1/2 cup ml)"),
                }
            }
            ":key" => {
                if arg.eq_ignore_ascii_case("clear") {
                    gateway.clear_credential().await;
                    credential = None;
                    println!("Cached API key cleared; back to demo mode.");
                } else if arg.is_empty() {
                    println!("Usage: :key <api key> | :key clear");
                } else {
                    gateway.store_credential(arg).await;
                    credential = Some(arg.to_string());
                    println!("API key cached. Live chat enabled.");
                }
            }
            other => println!("Unknown command {}. Try :help.", other),
        }
    }

    // Dropping the store drops the write-behind sender; the writer drains
    // the final snapshot before exiting.
    drop(store);
    let _ = writer.await;
    println!("Goodbye!");
    Ok(())
}

async fn send_message(
    text: &str,
    store: &mut StateStore,
    credential: &Option<String>,
    model: &Option<String>,
) {
    let history = current_history(store);
    let session_id = match store.current_session() {
        Some(session) => session.id.clone(),
        None => store.create_session(None),
    };
    store.append_message(
        &session_id,
        NewMessage {
            role: Role::User,
            content: text.to_string(),
            recipe: None,
        },
    );

    let region = store.state().selected_region;
    let outcome = chat::respond(text, region, &history, credential.as_deref(), model.clone()).await;

    if !outcome.is_live && credential.is_some() {
        println!("(live mode unavailable right now, showing an offline reply)");
    }
    println!("\n{}\n", outcome.text);
    if let Some(recipe) = &outcome.recipe {
        print_recipe(recipe);
        println!(":save keeps this recipe; :shop adds its ingredients to your list.\n");
    }

    store.append_message(
        &session_id,
        NewMessage {
            role: Role::Assistant,
            content: outcome.text,
            recipe: outcome.recipe,
        },
    );
}

fn current_history(store: &StateStore) -> Vec<ChatMessage> {
    store
        .current_session()
        .map(|session| {
            session
                .messages
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str().to_string(),
                    content: message.content.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn last_conversation_recipe(store: &StateStore) -> Option<Recipe> {
    store
        .current_session()
        .and_then(|session| session.messages.iter().rev().find_map(|m| m.recipe.clone()))
}

fn parse_region_arg(arg: &str) -> Option<RegionFilter> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("all") {
        return Some(RegionFilter::All);
    }
    let region = Region::from_tag(trimmed);
    // from_tag falls back to International; only accept that when asked for
    if region == Region::International && !trimmed.eq_ignore_ascii_case("international") {
        return None;
    }
    Some(RegionFilter::Only(region))
}

fn indexed(arg: &str, len: usize) -> Option<usize> {
    let number = arg.trim().parse::<usize>().ok()?;
    (number >= 1 && number <= len).then(|| number - 1)
}

fn category_label(category: TodoCategory) -> &'static str {
    match category {
        TodoCategory::Prep => "prep",
        TodoCategory::Shopping => "shopping",
        TodoCategory::Cooking => "cooking",
        TodoCategory::Other => "other",
    }
}

fn print_recipe(recipe: &Recipe) {
    println!("=== {} ===", recipe.name);
    println!(
        "{} · {:?} · serves {}",
        recipe.region.label(),
        recipe.difficulty,
        recipe.servings
    );
    if !recipe.prep_time.is_empty() || !recipe.cook_time.is_empty() {
        println!("Prep: {}   Cook: {}", recipe.prep_time, recipe.cook_time);
    }
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    if !recipe.ingredients.is_empty() {
        println!("Ingredients:");
        for ingredient in &recipe.ingredients {
            println!("  - {}", format_shopping_entry(ingredient));
        }
    }
    if !recipe.instructions.is_empty() {
        println!("Instructions:");
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
    for tip in &recipe.tips {
        println!("  Tip: {}", tip);
    }
    if !recipe.tags.is_empty() {
        println!("Tags: {}", recipe.tags.join(", "));
    }
    println!();
}

fn print_nutrition(table: &NutritionTable, recipe: &Recipe) {
    let estimate = table.estimate_recipe(recipe);
    if estimate.matched_ingredients == 0 {
        println!(
            "No nutrition data matched the ingredients of \"{}\".",
            recipe.name
        );
        return;
    }
    let per_serving = estimate.per_serving(recipe.servings);
    println!(
        "Rough estimate for \"{}\" (matched {} of {} ingredients):",
        recipe.name, estimate.matched_ingredients, estimate.total_ingredients
    );
    let line = |label: &str, value: Option<f32>, unit: &str| {
        if let Some(value) = value {
            println!("  {:<10} {:>7.0}{}", label, value, unit);
        }
    };
    line("kcal", per_serving.kcal, "");
    line("protein", per_serving.protein_g, " g");
    line("carbs", per_serving.carbs_g, " g");
    line("fat", per_serving.fat_g, " g");
    println!("  (per serving, best-effort matching by ingredient name)");
}

fn print_help() {
    println!(
        "Commands:\n\
           :new [title]        start a new conversation\n\
           :sessions           list conversations (* = current)\n\
           :open <n>           switch conversation\n\
           :delete <n>         delete conversation\n\
           :save               save the latest recipe from this conversation\n\
           :recipes            list saved recipes\n\
           :unsave <n>         remove a saved recipe\n\
           :shop [n]           add a recipe's ingredients to the shopping list\n\
           :todos              show the todo list\n\
           :done <n>           toggle a todo\n\
           :deltodo <n>        delete a todo\n\
           :cleardone          remove all completed todos\n\
           :region <tag|all>   filter cuisine region\n\
           :scale <n> <srv>    show a saved recipe scaled to a serving count\n\
           :nutrition [n]      rough nutrition estimate for a recipe\n\
           :sub <ingredient>   ingredient substitutions\n\
           :convert <amt> <from> <to>   unit conversion\n\
           :key <key|clear>    cache or clear the chat API key\n\
           :quit               exit"
    );
}
