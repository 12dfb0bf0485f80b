use clap::{App, Arg};
use log::{debug, error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::exit;

use prefs::FileStore;

mod prefs;

fn main() {
    let matches = App::new("Gradient Preference Tool")
        .version("0.1")
        .about("Remembers which background gradient you picked last time.")
        .arg(
            Arg::with_name("PRESET")
                .help("Number of the gradient preset to switch to")
                .index(1),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("List the available gradient presets"),
        )
        .arg(
            Arg::with_name("store")
                .long("store")
                .takes_value(true)
                .value_name("FILE")
                .help("Preference file to use instead of the default location"),
        )
        .arg(Arg::with_name("v").short("v").help("Print extra info"))
        .get_matches();

    let verbosity = if matches.is_present("v") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(
        verbosity,
        ConfigBuilder::default()
            .set_thread_level(LevelFilter::Trace)
            .set_target_level(LevelFilter::Trace)
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    if matches.is_present("list") {
        for (index, preset) in prefs::presets().iter().enumerate() {
            info!("{}: {} ({})", index, preset.name, preset.gradient);
        }
        return;
    }

    let path = match matches
        .value_of("store")
        .map(PathBuf::from)
        .or_else(FileStore::default_path)
    {
        Some(path) => path,
        None => {
            error!("Could not determine a preference file location. Pass one with --store.");
            exit(1)
        }
    };
    debug!("Preference file: {}", path.display());

    let mut store = FileStore::open(path);

    // A failed restore is not an error, the compiled-in default takes over.
    let gradient = prefs::restore(&store).unwrap_or_default();
    info!("Background gradient: {}", gradient);

    if let Some(selection) = matches.value_of("PRESET") {
        let presets = prefs::presets();

        let index: usize = match selection.parse() {
            Ok(index) if index < presets.len() => index,
            _ => {
                error!(
                    "'{}' is not a preset number. Use --list to see the options.",
                    selection
                );
                exit(1)
            }
        };

        prefs::save(&mut store, &presets[index].gradient);
        info!(
            "Switched to '{}': {}",
            presets[index].name, presets[index].gradient
        );
    }
}
