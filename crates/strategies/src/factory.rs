use anyhow::Result;
use core_types::StrategyConfig;

use crate::hysteresis::HysteresisTracker;
use crate::types::HysteresisSettings;
use crate::Strategy;

/// Builds the strategy named in `config`, parsing its `params` table.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy + Send>> {
    let strategy: Box<dyn Strategy + Send> = match config.name.as_str() {
        "hysteresis" => {
            let settings: HysteresisSettings = config.params.clone().try_into()?;
            settings.validate()?;
            Box::new(HysteresisTracker::new(settings))
        }
        unknown => return Err(core_types::Error::UnknownStrategy(unknown.to_string()).into()),
    };

    tracing::info!(strategy = strategy.name(), "Strategy created.");
    Ok(strategy)
}
