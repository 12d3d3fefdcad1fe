//! Integration tests module
//!
//! This module contains the integration tests for MeetPoll, organized by
//! layer: the HTTP handlers and the meeting store underneath them.
