pub mod filters;
pub mod streams;

pub use filters::{GameFilter, apply_filter, leagues, live_count, matches_query, search_games};
pub use streams::{
    dedup_streams, failover_stream, normalize, prepare_event, prepare_events,
    select_default_stream,
};
