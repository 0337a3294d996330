pub mod lookups;
pub mod notes;
pub mod tickets;
pub mod users;

pub use lookups::LookupRepository;
pub use notes::NoteRepository;
pub use tickets::TicketRepository;
pub use users::UserRepository;
