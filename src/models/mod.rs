pub mod user;
pub mod gallery;
pub mod booking;
pub mod room;
pub mod review;

pub use user::{Role, User, Viewer};
pub use gallery::{Gallery, GalleryFilter, GalleryInput, GalleryPatch};
pub use booking::{Booking, BookingStatus};
pub use room::{NewRoom, Room};
pub use review::{RatingSummary, Review, ReviewInput};
