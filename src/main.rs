use flashlearn::app::App;
use flashlearn::config::{CONFIG_FILE, Config};
use flashlearn::{CardStore, ScoreTracker};

use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::load(CONFIG_FILE)?;
    let cards = CardStore::open(config.deck_path())?;
    let scores = ScoreTracker::open(config.score_path())?;

    let stdin = io::stdin();
    let mut app = App::new(cards, scores, stdin.lock(), io::stdout());
    app.run()?;
    Ok(())
}
