pub mod notes_server;
