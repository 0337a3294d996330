pub mod lookup;
pub mod note;
pub mod product;
pub mod role;
pub mod service;
pub mod status;
pub mod ticket;
pub mod user;

pub use lookup::Lookup;
pub use note::{NewNote, Note, NoteListing};
pub use product::Product;
pub use role::Role;
pub use service::Service;
pub use status::Status;
pub use ticket::{NewTicket, Ticket, TicketChanges, TicketListing};
pub use user::{NewUser, User, UserProfile};
