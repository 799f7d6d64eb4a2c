//! Charts module - Price vs moving average plot

mod plotter;

pub use plotter::ChartPlotter;
