// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/*
// Middleware: jwt_auth_middleware inserts the AuthUser extension

pub mod auth;    // GET /api/auth/whoami
pub mod board;   // GET /api/board
pub mod tickets; // /api/tickets[/new|/:id]
pub mod users;   // /api/users/:id
