//! CLI command implementations

use anyhow::Context;
use console::style;
use kino_embed::{
    build_configuration, default_player_id, normalize, resolve_public_id, AccountContextProvider,
    CloudConfig, DeliveryUrl, DeliveryUrlBuilder, ElementAttributes, EnvAccountContext,
    PlayerProps, WidgetAssets,
};
use std::path::Path;
use tracing::{debug, info};

use crate::output::{format_fields, Field, OutputFormat};

/// Account settings given on the command line
#[derive(Debug, Default)]
pub struct AccountOverrides {
    pub cloud_name: Option<String>,
    pub secure_distribution: Option<String>,
    pub private_cdn: bool,
}

impl AccountOverrides {
    fn into_config(self) -> CloudConfig {
        let mut config = CloudConfig::default();
        config.cloud.cloud_name = self.cloud_name;
        config.url.secure_distribution = self.secure_distribution;
        if self.private_cdn {
            config.url.private_cdn = Some(true);
        }
        config
    }
}

/// Print the widget options for a props file
pub fn config(props_path: &Path, overrides: AccountOverrides, format: OutputFormat) -> anyhow::Result<()> {
    info!(path = %props_path.display(), "Building player configuration");

    let json = std::fs::read_to_string(props_path)
        .with_context(|| format!("Failed to read {}", props_path.display()))?;
    let props = PlayerProps::from_json(&json).context("Invalid player props")?;

    // Environment, then command line, then the props' own config
    let base = EnvAccountContext::from_env().base().merged_with(&overrides.into_config());
    let account = EnvAccountContext::new(base).resolve(props.config.as_ref());
    debug!(?account, "Resolved account");

    let resolver = DeliveryUrlBuilder::new(account.clone());
    let normalized = normalize(&props, &resolver);
    let configuration = build_configuration(&normalized, &account);
    let options = serde_json::Value::Object(configuration.to_widget_options());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        _ => {
            let element = ElementAttributes::new(
                &normalized.player_id,
                props.class_name.as_deref(),
                normalized.width.as_ref(),
                normalized.height.as_ref(),
            );
            let fields = vec![
                Field::new("publicId", &normalized.public_id),
                Field::new("playerId", &element.id),
                Field::new("class", &element.class_name),
                Field::new("style", &element.container_style),
            ];
            println!("{}", style("Player").bold());
            println!("{}\n", format_fields(&fields, format));

            let rows: Vec<Field> = configuration
                .to_widget_options()
                .into_iter()
                .map(|(key, value)| Field::new(key, compact(&value)))
                .collect();
            println!("{}", style("Widget options").bold());
            println!("{}", format_fields(&rows, format));
        }
    }

    Ok(())
}

/// Print the public id a source resolves to
pub fn resolve(src: &str, format: OutputFormat) -> anyhow::Result<()> {
    let public_id = resolve_public_id(src);
    let mut fields = vec![
        Field::new("publicId", &public_id),
        Field::new("playerId", default_player_id(&public_id)),
    ];

    if let Some(url) = DeliveryUrl::parse(src) {
        fields.push(Field::new("host", &url.host));
        if let Some(cloud_name) = &url.cloud_name {
            fields.push(Field::new("cloudName", cloud_name));
        }
        fields.push(Field::new("assetType", &url.asset_type));
        if let Some(delivery_type) = &url.delivery_type {
            fields.push(Field::new("deliveryType", delivery_type));
        }
        if !url.transformations.is_empty() {
            fields.push(Field::new("transformations", url.transformations.join("/")));
        }
        if let Some(version) = url.version {
            fields.push(Field::new("version", version));
        }
        if let Some(ext) = &url.format {
            fields.push(Field::new("format", ext));
        }
    } else if src.starts_with("http") {
        println!("{} not a delivery URL, using it as the public id", style("warning:").yellow());
    }

    println!("{}", format_fields(&fields, format));
    Ok(())
}

/// Print the widget script and stylesheet for a player id
pub fn assets(player_id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let assets = WidgetAssets::for_player(player_id);
    let fields = vec![
        Field::new("version", assets.version),
        Field::new("script", &assets.script_url),
        Field::new("stylesheet", &assets.stylesheet_url),
        Field::new("scriptId", &assets.script_id),
    ];
    println!("{}", format_fields(&fields, format));
    Ok(())
}

fn compact(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
