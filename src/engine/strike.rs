use super::OptionSide;
use crate::model::AnalysisConfig;

/// Quotients are snapped to this many steps per grid unit before the
/// tie-break, so `874.99999999` on a 50 grid is treated as the 875 midpoint.
const GRID_SNAP: f64 = 1e9;

/// Round `price` to the nearest multiple of `interval`.
///
/// Exact midpoints go to the larger multiple (round-half-up): 875 on a 50
/// grid becomes 900, 877.2 becomes 900, 870 becomes 850.
pub fn round_to_grid(price: f64, interval: f64) -> f64 {
    (grid_steps(price, interval) + 0.5).floor() * interval
}

/// `price / interval`, snapped so decimal grids like 0.05 land on whole steps.
fn grid_steps(price: f64, interval: f64) -> f64 {
    ((price / interval) * GRID_SNAP).round() / GRID_SNAP
}

/// Strike for one leg: spot pushed out by the margin, then snapped to the grid.
///
/// With a positive margin the call strike ends strictly below spot and the
/// put strike strictly above it. If rounding lands on or across spot the
/// strike moves to the nearest grid point on the correct side. The call
/// strike never goes below 0.
pub fn select(side: OptionSide, spot: f64, config: &AnalysisConfig) -> f64 {
    let m = config.margin_fraction();
    let interval = config.strike_interval;

    let raw = match side {
        OptionSide::Call => spot * (1.0 - m),
        OptionSide::Put => spot * (1.0 + m),
    };
    let mut steps = (grid_steps(raw, interval) + 0.5).floor();
    if m <= 0.0 {
        return steps * interval;
    }

    let spot_steps = grid_steps(spot, interval);
    match side {
        OptionSide::Call => {
            if steps >= spot_steps {
                steps = spot_steps.ceil() - 1.0;
            }
            while steps > 0.0 && steps * interval >= spot {
                steps -= 1.0;
            }
            steps.max(0.0) * interval
        }
        OptionSide::Put => {
            if steps <= spot_steps {
                steps = spot_steps.floor() + 1.0;
            }
            while steps * interval <= spot {
                steps += 1.0;
            }
            steps * interval
        }
    }
}
