pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use ranking::RankingEntry;
