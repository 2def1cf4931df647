use ethos_wall::{app, config::WallConfig};

/// `ethos-wall [ASSET_DIR]`
fn main() -> anyhow::Result<()> {
    let mut config = WallConfig::default();
    if let Some(dir) = std::env::args().nth(1) {
        config = config.with_asset_dir(dir);
    }
    app::run(config)
}
