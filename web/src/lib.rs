use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod panels;
mod utils;

/// Page options, written into the URL hash as `#--seed=42&-vv`.
#[derive(Parser, Debug)]
#[command(name = "divinity", version, about, long_about = None)]
struct Args {
    /// Console log level
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

impl Args {
    /// Each `#`/`&` separated piece of the hash is one argument. The leading empty piece stands in for the binary name.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let hash = gloo::utils::window().location().hash().unwrap_or_default();
    let args = Args::from_hash(&hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring page options: {err}"));
        Args::parse_from([""])
    });

    if let Some(level) = args.verbose.log_level() {
        console_log::init_with_level(level).expect("logger installed twice");
    }
    log::debug!("page options: {:?}", args);

    let Some(root) = gloo::utils::document().get_element_by_id("game") else {
        log::error!("no element with id=\"game\" to mount into");
        return;
    };
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_hash("").unwrap();
        assert_eq!(args.game.seed, None);
    }

    #[test]
    fn hash_carries_seed_and_verbosity() {
        let args = Args::from_hash("#--seed=42&-vv").unwrap();
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(Args::from_hash("#--speed=3").is_err());
    }
}
