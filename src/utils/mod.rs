mod aggregation;

pub use aggregation::{aggregate, to_fixed, AVERAGE_POINTS_LABEL, AVERAGE_PRICE_LABEL};
