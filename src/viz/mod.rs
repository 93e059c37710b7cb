// Visualization helpers: dataset stats tables and topic word clouds.

pub mod stats;
pub mod wordcloud;
