//! Host-side integration tests. Everything here runs against the mock
//! adapters in `mock_hw` — no Pi peripherals, no bluetooth.

mod ride_service_tests;
mod watchdog_tests;
