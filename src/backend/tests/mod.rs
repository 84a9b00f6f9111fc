//! Unit tests for the backend client.

mod storage_tests;
