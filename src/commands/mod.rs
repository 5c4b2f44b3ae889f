/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `inbox` — Fetch the conversation list once and print it
- `watch` — Poll for changes and print updates until interrupted
- `send`  — Send one outbound message

These handlers are intentionally small and use the library components:
the API client, the sync session, and the data model.
*/

pub mod inbox;
pub mod send;
pub mod watch;
