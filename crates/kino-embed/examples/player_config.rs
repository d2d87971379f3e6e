//! Player configuration example
//!
//! Builds the widget options for a typical embed and prints them.
//!
//! Run with: cargo run -p kino-embed --example player_config

use kino_embed::{
    build_configuration, normalize, AccountContext, AssetOptions, AutoplayInput, DeliveryUrlBuilder,
    LogoInput, LogoOptions, PlayerProps, PosterInput, WidgetAssets,
};

fn main() {
    println!("Kino Embed - Player Configuration Example");
    println!("=========================================\n");

    let account = AccountContext {
        cloud_name: Some("demo".to_string()),
        ..Default::default()
    };
    let resolver = DeliveryUrlBuilder::new(account.clone());

    let props = PlayerProps::new("https://res.cloudinary.com/demo/video/upload/v1690000000/samples/sea-turtle.mp4")
        .with_size(1620, 1080)
        .with_autoplay(AutoplayInput::Text("on-scroll".to_string()))
        .with_logo(LogoInput::Custom(LogoOptions {
            image_url: Some("https://example.com/logo.png".to_string()),
            on_click_url: Some("https://example.com".to_string()),
        }))
        .with_poster(PosterInput::Options(
            AssetOptions::new().with("startOffset", "2").with("crop", "fill"),
        ));

    let normalized = normalize(&props, &resolver);
    println!("Public id:  {}", normalized.public_id);
    println!("Player id:  {}", normalized.player_id);
    println!("Autoplay:   {:?}", normalized.autoplay);
    println!("Logo:       {:?}", normalized.logo);
    println!();

    let config = build_configuration(&normalized, &account);
    match serde_json::to_string_pretty(&config.to_widget_options()) {
        Ok(json) => println!("Widget options:\n{}\n", json),
        Err(e) => eprintln!("Failed to render options: {}", e),
    }

    let assets = WidgetAssets::for_player(&normalized.player_id);
    println!("Widget assets (v{}):", assets.version);
    println!("  Script:     {}", assets.script_url);
    println!("  Stylesheet: {}", assets.stylesheet_url);
}
