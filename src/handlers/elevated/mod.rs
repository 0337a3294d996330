// handlers/elevated/mod.rs - Administrator handlers
//
// Route Prefix: /api/admin/*
// Middleware: jwt_auth_middleware, then require_admin_middleware

pub mod board;   // GET /api/admin
pub mod lookups; // /api/admin/{products,services,roles,statuses}
pub mod notes;   // /api/admin/notes, /api/admin/tickets/:id/notes
pub mod tickets; // /api/admin/tickets
pub mod users;   // /api/admin/users
