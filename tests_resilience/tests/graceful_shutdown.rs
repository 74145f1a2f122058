//! Graceful Shutdown Integration Tests
//!
//! A program returning 0, or calling terminate, stops the image with the
//! OK code and nothing after the call runs.

use kernel_api::TerminationCode;
use std::sync::atomic::{AtomicBool, Ordering};
use tests_resilience::{halt_code, test_params, test_platform};

#[test]
fn test_terminate_from_program_never_returns() {
    let sim = test_platform();
    let sentinel = AtomicBool::new(false);

    let code = halt_code(|| {
        system::execute(test_params(), sim.platform, |api| {
            if std::hint::black_box(true) {
                api.terminate();
            }
            sentinel.store(true, Ordering::SeqCst);
            1
        })
    });

    assert_eq!(code, Some(TerminationCode::Ok));
    assert!(!sentinel.load(Ordering::SeqCst));
    assert_eq!(sim.cpu.halt_count(), 1);
    assert_eq!(sim.cpu.last_halt(), Some(TerminationCode::Ok));
}
