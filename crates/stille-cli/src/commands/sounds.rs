use std::path::Path;

use stille_core::Sound;

use super::load_config;

pub fn run(config: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let library = config.sound_library()?;

    if json {
        let entries: Vec<_> = Sound::ALL
            .into_iter()
            .map(|sound| {
                serde_json::json!({
                    "name": sound.name(),
                    "label": sound.label(),
                    "asset": library.resolve(sound),
                    "available": library.is_available(sound),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Sounds in {}:", library.dir().display());
    for sound in Sound::ALL {
        let status = match library.resolve(sound) {
            None => "no audio".to_string(),
            Some(path) if path.is_file() => format!("{}", path.display()),
            Some(path) => format!("{} (missing)", path.display()),
        };
        println!("  {:<12} {:<12} {status}", sound.name(), sound.label());
    }
    Ok(())
}
