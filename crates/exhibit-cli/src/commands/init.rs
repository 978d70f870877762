//! Init command handler

use crate::error::CliError;
use exhibit::ExhibitConfig;
use std::fs;
use std::path::Path;

const ENV_TEMPLATE: &str = r#"# AI exhibition configuration
# Gemini API key used by curator and audience
GEMINI_API_KEY=
# RUST_LOG=exhibit=info
"#;

pub async fn run_init(config: &ExhibitConfig) -> Result<(), CliError> {
    println!("🚀 Initializing exhibition in {}...", config.base_dir);

    let base = Path::new(&config.base_dir);
    for dir in [&config.images_dir, &config.texts_dir] {
        let path = base.join(dir);
        if !path.exists() {
            println!("📁 Creating {} directory...", dir);
            fs::create_dir_all(&path)
                .map_err(|e| CliError::InvalidInput(format!("Failed to create {}: {}", dir, e)))?;
        } else {
            println!("✅ {} directory already exists", dir);
        }
    }

    let env_path = base.join(".env");
    if !env_path.exists() {
        println!("📝 Creating .env file...");
        fs::write(&env_path, ENV_TEMPLATE)
            .map_err(|e| CliError::InvalidInput(format!("Failed to create .env: {}", e)))?;
    }

    let config_path = base.join("exhibit.json");
    if !config_path.exists() {
        println!("📝 Writing default exhibit.json...");
        let mut defaults = ExhibitConfig::default();
        defaults.base_dir = ".".to_string();
        let json = serde_json::to_string_pretty(&defaults)
            .map_err(|e| CliError::Config(format!("Failed to render config: {}", e)))?;
        fs::write(&config_path, json)?;
    }

    println!("\n✨ Exhibition initialized successfully!");
    println!("\nNext steps:");
    println!("  1. Put your key in .env (GEMINI_API_KEY)");
    println!("  2. Run 'exhibit curator' to open the exhibition");
    println!("  3. Run 'exhibit audience --id 1' (and 2, 3) in other terminals");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_layout_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExhibitConfig {
            base_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };

        run_init(&config).await.unwrap();
        assert!(dir.path().join("GeneratedImages").is_dir());
        assert!(dir.path().join("GeneratedTexts").is_dir());
        assert!(
            fs::read_to_string(dir.path().join(".env"))
                .unwrap()
                .contains("GEMINI_API_KEY=")
        );

        let written = ExhibitConfig::load_from_file(&dir.path().join("exhibit.json")).unwrap();
        assert_eq!(written.base_dir, ".");
        assert_eq!(written.curator.audience_count, 3);

        fs::write(dir.path().join(".env"), "GEMINI_API_KEY=kept").unwrap();
        run_init(&config).await.unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(".env")).unwrap(),
            "GEMINI_API_KEY=kept"
        );
    }
}
