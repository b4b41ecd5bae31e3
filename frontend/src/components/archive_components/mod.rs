pub mod active_chips;
pub mod empty_state;
pub mod facet_tabs;
pub mod infinite_list;
pub mod loading_overlay;
pub mod resource_archive;
pub mod resource_cards;
pub mod result_count;
pub mod search_box;
