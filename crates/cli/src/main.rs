use accounts::{AccountStore, JsonFileAccountStore, UserIdentity};
use anyhow::{anyhow, bail, Context, Result};
use catalog::{JsonFileCatalog, Preferences, Recipe, SharedCatalog};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use server::{FeedbackTracker, RecommendationConfig, RecommendationOrchestrator, UserSession};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Draws in a row that may come back empty before the swipe loop gives up
const MAX_EMPTY_DRAWS: usize = 5;

/// CookIQ - Recipe Recommendation Engine
#[derive(Parser)]
#[command(name = "cookiq")]
#[command(about = "Recipe recommendations from preferences and feedback", long_about = None)]
struct Cli {
    /// Path to the recipe catalog (JSON)
    #[arg(short, long, default_value = "data/recipes.json")]
    catalog: PathBuf,

    /// Path to the account store (JSON, created on first write)
    #[arg(short, long, default_value = "data/accounts.json")]
    accounts: PathBuf,

    /// Optional recommendation config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Username to log in as; omit to browse as a guest
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the next batch of recipe recommendations
    Recommend {
        /// Show the ranked pool with scores before the batch is cut
        #[arg(long)]
        explain: bool,
    },

    /// Get unseen suggestions, ordered by similarity to recipes you liked
    Suggest,

    /// Like a recipe by name
    Like {
        /// Recipe name (case-insensitive)
        name: String,
    },

    /// Dislike a recipe by name
    Dislike {
        /// Recipe name (case-insensitive)
        name: String,
    },

    /// Remove a recipe from your liked list
    Unlike {
        /// Recipe name (case-insensitive)
        name: String,
    },

    /// Search recipes by name
    Search {
        /// Text to search for (case-insensitive substring match)
        query: String,
    },

    /// List the recipes you liked
    Liked,

    /// Show or edit saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },

    /// Interactive session: like or dislike recipes one at a time
    Swipe,

    /// Run concurrent sessions to test performance
    Benchmark {
        /// Number of sessions to run
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of sessions running at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Subcommand)]
enum PrefsCommand {
    /// Print the saved preferences
    Show,
    /// Change some preferences; unspecified fields keep their value
    Set(PrefsEdit),
    /// Clear every preference
    Reset,
}

#[derive(Args)]
struct PrefsEdit {
    #[arg(long)]
    vegetarian: Option<bool>,
    #[arg(long)]
    keto: Option<bool>,
    #[arg(long)]
    gluten_free: Option<bool>,
    #[arg(long)]
    low_calorie: Option<bool>,
    #[arg(long)]
    high_calorie: Option<bool>,
    #[arg(long)]
    high_protein: Option<bool>,
    #[arg(long)]
    italian: Option<bool>,
    #[arg(long)]
    mexican: Option<bool>,
    #[arg(long)]
    asian: Option<bool>,
    #[arg(long)]
    american: Option<bool>,
    #[arg(long)]
    mediterranean: Option<bool>,
    /// Minutes, 0 for no limit
    #[arg(long)]
    max_cook_time: Option<u32>,
    /// 0 for no limit
    #[arg(long)]
    max_budget: Option<f64>,
    /// Comma-separated ingredients you have; pass "" to clear
    #[arg(long, value_delimiter = ',')]
    ingredients: Option<Vec<String>>,
}

impl PrefsEdit {
    fn apply(self, prefs: &mut Preferences) {
        let flags = [
            (self.vegetarian, &mut prefs.vegetarian),
            (self.keto, &mut prefs.keto),
            (self.gluten_free, &mut prefs.gluten_free),
            (self.low_calorie, &mut prefs.low_calorie),
            (self.high_calorie, &mut prefs.high_calorie),
            (self.high_protein, &mut prefs.high_protein),
            (self.italian, &mut prefs.italian),
            (self.mexican, &mut prefs.mexican),
            (self.asian, &mut prefs.asian),
            (self.american, &mut prefs.american),
            (self.mediterranean, &mut prefs.mediterranean),
        ];
        for (value, field) in flags {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(minutes) = self.max_cook_time {
            prefs.max_cook_time = minutes;
        }
        if let Some(budget) = self.max_budget {
            prefs.max_budget = budget;
        }
        if let Some(ingredients) = self.ingredients {
            prefs.available_ingredients = ingredients
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading recipe catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Arc::new(
        SharedCatalog::load(&JsonFileCatalog::new(&cli.catalog))
            .context("Failed to load recipe catalog")?,
    );
    println!(
        "{} Loaded {} recipes in {:?}",
        "✓".green(),
        catalog.snapshot().len(),
        start.elapsed()
    );

    let config = match &cli.config {
        Some(path) => RecommendationConfig::from_json_file(path)?,
        None => RecommendationConfig::default(),
    };

    let store = Arc::new(
        JsonFileAccountStore::open(&cli.accounts).context("Failed to open account store")?,
    );
    let user = login(store.as_ref(), cli.user.as_deref())?;

    let orchestrator = Arc::new(RecommendationOrchestrator::new(catalog, store, config));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { explain } => handle_recommend(&orchestrator, &user, explain)?,
        Commands::Suggest => handle_suggest(orchestrator, user)?,
        Commands::Like { name } => handle_feedback(orchestrator, user, &name, true)?,
        Commands::Dislike { name } => handle_feedback(orchestrator, user, &name, false)?,
        Commands::Unlike { name } => handle_unlike(&orchestrator, &user, &name)?,
        Commands::Search { query } => handle_search(&orchestrator, &query),
        Commands::Liked => handle_liked(&orchestrator, &user)?,
        Commands::Prefs { action } => handle_prefs(&orchestrator, &user, action)?,
        Commands::Swipe => handle_swipe(orchestrator, user)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

/// Resolve the identity for this run, registering the account on first use
fn login(store: &dyn AccountStore, username: Option<&str>) -> Result<UserIdentity> {
    let Some(username) = username else {
        println!("{}", "Browsing as guest".dimmed());
        return Ok(UserIdentity::Guest);
    };

    let user = UserIdentity::registered(username);
    let name = user.username().unwrap_or_default();
    if name.is_empty() {
        bail!("Username must not be empty");
    }
    if store.ensure_account(name)? {
        println!("{} Created account {}", "✓".green(), name.bold());
    }
    info!("Logged in as {}", name);
    Ok(user)
}

fn require_registered(user: &UserIdentity) -> Result<()> {
    if user.is_guest() {
        bail!("This command needs a user; pass --user <name>");
    }
    Ok(())
}

fn find_recipe(orchestrator: &RecommendationOrchestrator, name: &str) -> Result<Recipe> {
    orchestrator
        .recipe_by_name(name)
        .ok_or_else(|| anyhow!("Recipe '{}' not found", name))
}

/// Handle the 'recommend' command
fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    user: &UserIdentity,
    explain: bool,
) -> Result<()> {
    let prefs = orchestrator.preferences(user)?;

    if explain {
        let ranked = orchestrator.ranked_candidates(&prefs, user)?;
        println!("{}", "Ranked pool:".bold().blue());
        for (rank, scored) in ranked.iter().enumerate() {
            println!(
                "  {}. {} - Score: {}",
                (rank + 1).to_string().green(),
                scored.recipe.name,
                scored.score
            );
        }
        println!();
    }

    let recommendations = orchestrator.get_recommendations(&prefs, user)?;
    print_recipes("Recipe Recommendations:", &recommendations);
    Ok(())
}

/// Handle the 'suggest' command
fn handle_suggest(orchestrator: Arc<RecommendationOrchestrator>, user: UserIdentity) -> Result<()> {
    let prefs = orchestrator.preferences(&user)?;
    let tracker = FeedbackTracker::new(orchestrator, Arc::new(UserSession::new(user)));
    tracker.restore_saved_feedback()?;

    let suggestions = tracker.get_feedback_based_recommendations(&prefs)?;
    print_recipes("Suggestions:", &suggestions);
    Ok(())
}

/// Handle the 'like' and 'dislike' commands
fn handle_feedback(
    orchestrator: Arc<RecommendationOrchestrator>,
    user: UserIdentity,
    name: &str,
    liked: bool,
) -> Result<()> {
    require_registered(&user)?;
    let recipe = find_recipe(&orchestrator, name)?;

    let tracker = FeedbackTracker::new(orchestrator, Arc::new(UserSession::new(user)));
    tracker.record_feedback(&recipe, liked)?;

    let verb = if liked { "Liked" } else { "Disliked" };
    println!("{} {} {}", "✓".green(), verb, recipe.name.bold());
    Ok(())
}

/// Handle the 'unlike' command
fn handle_unlike(orchestrator: &RecommendationOrchestrator, user: &UserIdentity, name: &str) -> Result<()> {
    require_registered(user)?;
    let recipe = find_recipe(orchestrator, name)?;
    let username = user.username().unwrap_or_default();

    if orchestrator.accounts().remove_liked(username, &recipe.name)? {
        println!("{} Removed {} from liked recipes", "✓".green(), recipe.name.bold());
    } else {
        println!("{} was not in your liked recipes", recipe.name.bold());
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(orchestrator: &RecommendationOrchestrator, query: &str) {
    let query_lower = query.to_lowercase();

    // Exact matches first, then substring matches, catalog order within each
    let mut matches: Vec<(usize, Recipe)> = orchestrator
        .all_recipes()
        .into_iter()
        .filter_map(|recipe| {
            let name = recipe.name.to_lowercase();
            if name == query_lower {
                Some((0, recipe))
            } else if name.contains(&query_lower) {
                Some((1, recipe))
            } else {
                None
            }
        })
        .collect();
    matches.sort_by_key(|(relevance, _)| *relevance);

    let found: Vec<Recipe> = matches.into_iter().take(20).map(|(_, recipe)| recipe).collect();
    print_recipes(&format!("Search results for '{}':", query), &found);
}

/// Handle the 'liked' command
fn handle_liked(orchestrator: &RecommendationOrchestrator, user: &UserIdentity) -> Result<()> {
    require_registered(user)?;
    let liked = orchestrator.liked_recipes(user)?;
    print_recipes("Liked Recipes:", &liked);
    Ok(())
}

/// Handle the 'prefs' command
fn handle_prefs(
    orchestrator: &RecommendationOrchestrator,
    user: &UserIdentity,
    action: PrefsCommand,
) -> Result<()> {
    let prefs = match action {
        PrefsCommand::Show => orchestrator.preferences(user)?,
        PrefsCommand::Set(edit) => {
            require_registered(user)?;
            let mut prefs = orchestrator.preferences(user)?;
            edit.apply(&mut prefs);
            orchestrator.save_preferences(user, &prefs)?;
            println!("{} Preferences saved", "✓".green());
            prefs
        }
        PrefsCommand::Reset => {
            require_registered(user)?;
            let prefs = orchestrator.reset_preferences(user)?;
            println!("{} Preferences reset", "✓".green());
            prefs
        }
    };

    println!("{}", format!("Preferences for {}:", user).bold().blue());
    for line in prefs.to_string().lines() {
        println!("{}{}", "• ".green(), line);
    }
    Ok(())
}

/// Handle the 'swipe' command
fn handle_swipe(orchestrator: Arc<RecommendationOrchestrator>, user: UserIdentity) -> Result<()> {
    let prefs = orchestrator.preferences(&user)?;
    let tracker = FeedbackTracker::new(orchestrator, Arc::new(UserSession::new(user)));
    let restored = tracker.restore_saved_feedback()?;
    if restored > 0 {
        println!("{}", format!("Loaded {} saved ratings", restored).dimmed());
    }

    println!("{}", "y = like, n = dislike, s = skip, r = reset seen, q = quit".dimmed());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut empty_draws = 0;

    loop {
        let batch = tracker.get_feedback_based_recommendations(&prefs)?;
        if batch.is_empty() {
            empty_draws += 1;
            if empty_draws < MAX_EMPTY_DRAWS {
                continue;
            }
            println!(
                "{}",
                "No new recipes. Reset seen recipes (r) or quit (q)?".yellow()
            );
            match prompt(&mut lines)?.as_deref() {
                Some("r") => {
                    tracker.reset_seen();
                    empty_draws = 0;
                    continue;
                }
                _ => break,
            }
        }
        empty_draws = 0;

        for recipe in batch {
            tracker.mark_seen(&recipe);
            print_recipe_card(&recipe);

            match prompt(&mut lines)?.as_deref() {
                Some("y") => {
                    tracker.record_feedback(&recipe, true)?;
                    println!("{} Liked", "♥".red());
                }
                Some("n") => {
                    tracker.record_feedback(&recipe, false)?;
                    println!("{} Disliked", "✗".dimmed());
                }
                Some("r") => {
                    tracker.reset_seen();
                    break;
                }
                Some("q") | None => {
                    println!("Saw {} recipes this session", tracker.seen_count());
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    println!("Saw {} recipes this session", tracker.seen_count());
    Ok(())
}

/// Read one trimmed, lower-cased answer; `None` on end of input
fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_lowercase())),
        None => Ok(None),
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: Arc<RecommendationOrchestrator>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let limit = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // One guest session per request, each with random preferences
    let mut handles = vec![];
    for _ in 0..requests {
        let orchestrator = Arc::clone(&orchestrator);
        let permit = Arc::clone(&limit).acquire_owned().await?;
        let prefs = random_preferences();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            let tracker = FeedbackTracker::new(orchestrator, Arc::new(UserSession::guest()));
            let batch = tracker.get_new_suggestions(&prefs)?;
            if let Some(first) = batch.first() {
                tracker.record_feedback(first, true)?;
            }
            tracker.get_feedback_based_recommendations(&prefs)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let busy: Duration = timings.iter().sum();
    let avg_latency = busy / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Sessions: {} ({} at a time)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} sessions/second", throughput);

    Ok(())
}

fn random_preferences() -> Preferences {
    let mut rng = rand::rng();
    let mut prefs = Preferences::new();
    prefs.vegetarian = rng.random_bool(0.3);
    prefs.high_protein = rng.random_bool(0.2);
    prefs.italian = rng.random_bool(0.5);
    prefs.asian = rng.random_bool(0.5);
    prefs.max_cook_time = rng.random_range(0..=60);
    prefs.max_budget = f64::from(rng.random_range(0..=30u32));
    prefs
}

/// Print a header and a numbered list of recipes
fn print_recipes(header: &str, recipes: &[Recipe]) {
    println!("{}", header.bold().blue());
    if recipes.is_empty() {
        println!("  {}", "Nothing to show. Try changing your preferences.".yellow());
        return;
    }
    for (rank, recipe) in recipes.iter().enumerate() {
        println!(
            "{}. {} [{}] {} min, ${:.2}",
            (rank + 1).to_string().green(),
            recipe.name,
            tags(recipe),
            recipe.cook_time,
            recipe.cost
        );
    }
}

fn print_recipe_card(recipe: &Recipe) {
    println!();
    println!("{}", recipe.name.bold());
    println!("{}{}", "• ".cyan(), tags(recipe));
    println!("{}{} min, ${:.2}", "• ".cyan(), recipe.cook_time, recipe.cost);
    if !recipe.ingredients.is_empty() {
        println!("{}{}", "• ".cyan(), recipe.ingredients.join(", "));
    }
}

fn tags(recipe: &Recipe) -> String {
    [&recipe.cuisine, &recipe.dietary_category, &recipe.health_goals]
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
}
