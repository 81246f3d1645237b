use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "lead.toml";
pub const DEFAULT_STORAGE_KEY: &str = "leadFormAutosave_v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadConfig {
    pub dispatch: DispatchConfig,
    pub draft: DraftConfig,
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Empty means no webhook is configured and the mail fallback is used.
    pub webhook_url: String,
    pub mailto_address: String,
    pub mail_subject: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    pub storage_key: String,
    pub storage_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub topics: Vec<String>,
    pub contact_prefs: Vec<String>,
    pub submit_label: String,
    pub submitting_label: String,
    pub failure_notice: String,
    pub anchor: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            mailto_address: "deinmail@domain.de".to_string(),
            mail_subject: "Neuer Lead Versicherungs-Check".to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: PathBuf::from("./lead_draft.json"),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            topics: [
                "haftpflicht",
                "hausrat",
                "kfz",
                "rechtsschutz",
                "berufsunfaehigkeit",
                "altersvorsorge",
                "krankenversicherung",
                "sonstiges",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            contact_prefs: ["phone", "whatsapp", "email"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            submit_label: "✅ Jetzt kostenlosen Check sichern".to_string(),
            submitting_label: "Sende …".to_string(),
            failure_notice: "Senden hat nicht geklappt. Bitte versuch es nochmal oder schreib uns direkt per WhatsApp/Telefon.".to_string(),
            anchor: "#formular".to_string(),
        }
    }
}

impl DispatchConfig {
    pub fn has_webhook(&self) -> bool {
        !self.webhook_url.trim().is_empty()
    }
}

impl LeadConfig {
    /// Defaults, then `lead.toml` from the working directory if present,
    /// then `LEAD__` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Like `load`, looking for `lead.toml` in `dir`.
    pub fn load_in(dir: &Path) -> Result<Self, ConfigError> {
        let default_file = dir.join(DEFAULT_CONFIG_FILE);
        if default_file.exists() {
            Self::load_from(Some(&default_file))
        } else {
            Self::load_from(None)
        }
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&LeadConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LEAD")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("form.topics")
                .with_list_parse_key("form.contact_prefs")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let lead_config: LeadConfig = config.try_deserialize()?;

        lead_config.validate()?;

        Ok(lead_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.has_webhook() {
            let parsed = url::Url::parse(self.dispatch.webhook_url.trim()).map_err(|e| {
                ConfigError::Message(format!("Webhook URL is not a valid address: {}", e))
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::Message(
                    "Webhook URL must use http or https".to_string(),
                ));
            }
        }

        if self.dispatch.mailto_address.trim().is_empty() {
            return Err(ConfigError::Message(
                "Mail fallback address cannot be empty".to_string(),
            ));
        }

        if self.draft.storage_key.is_empty() {
            return Err(ConfigError::Message(
                "Draft storage key cannot be empty".to_string(),
            ));
        }

        if self.form.topics.is_empty() {
            return Err(ConfigError::Message(
                "At least one topic option is required".to_string(),
            ));
        }

        if self.form.contact_prefs.is_empty() {
            return Err(ConfigError::Message(
                "At least one contact preference option is required".to_string(),
            ));
        }

        Ok(())
    }
}
