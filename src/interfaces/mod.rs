pub mod stats_sink;
