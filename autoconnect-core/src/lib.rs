//! # autoconnect-core
//!
//! Core types and traits for the Auto-Connect sales assistant: transcript [`Message`]s, vehicle
//! records, the chat reply decoder ([`ChatReply`]), [`Carousel`] navigation, the backend traits
//! the widget talks through, and tracing initialization. Transport-agnostic; used by
//! autoconnect-client and autoconnect-widget.

pub mod backend;
pub mod carousel;
pub mod error;
pub mod logger;
pub mod reply;
pub mod types;

pub use backend::{ChatBackend, CrawlBackend, InventoryBackend, LeadBackend};
pub use carousel::{Carousel, Direction};
pub use error::{ApiError, Result};
pub use logger::init_tracing;
pub use reply::{ChatReply, RawChatReply, NO_INFORMATION_FOUND};
pub use types::{
    CardList, CrawlReport, InventoryCar, Lead, Message, MessageBody, MessageKind, Origin, Price,
    VariantDetail, VehicleVariant,
};
