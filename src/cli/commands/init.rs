use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This creates:
///  - the config directory (if missing)
///  - a default configuration file (if missing)
pub fn handle(cfg: &Config) -> AppResult<()> {
    let path = Config::config_file(cfg.dir());

    println!("⚙️  Initializing rtagger…");

    if path.exists() {
        println!("📄 Config file already present: {}", path.display());
    } else {
        cfg.save()?;
        println!("📄 Config file : {}", path.display());
    }

    println!("🎉 rtagger initialization completed!");
    println!("Next step: rtagger login --url <SERVER> --token <TOKEN>");
    Ok(())
}
