//! Collection logic: the paged and filtered collection view, the play queue,
//! the client-side record store and dashboard statistics.
//!
//! Nothing here talks to storage directly. The store and the queue issue
//! requests through [`gameshelf_catalog::GameGateway`].

pub mod queue;
pub mod stats;
pub mod store;
pub mod view;

pub use queue::{PlayQueue, QueueDisplay, QueueError, ReorderOutcome, ReorderPlan};
pub use stats::{CollectionStats, TOP_PLATFORMS};
pub use store::{CollectionStore, StoreError};
pub use view::{
    CollectionPage, CollectionQuery, CollectionView, DEFAULT_PAGE_SIZE, FormatFilter, PageItem,
    SortKey, SortKeyParseError, base_games_matching, compare_titles, filter_and_sort, paginate,
};
