//! Blink timer using ESP-IDF's esp_timer API.
//!
//! A periodic timer toggles the shared [`BlinkSource`] every
//! `half_period_ms`.  On simulation targets a plain thread sleeps and
//! toggles instead, which exercises the same atomic contract.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR); the
//! only thing they touch is the `BlinkSource`'s atomic phase.

use super::blink::BlinkSource;
use crate::error::{Error, Result};
use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn blink_tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static BlinkSource` passed to
    // `start_blink_timer`, valid for the whole program.
    let source = unsafe { &*(arg as *const BlinkSource) };
    source.toggle();
}

/// Running blink timer.  Dropping it stops the toggling.
pub struct BlinkTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    stop: std::sync::Arc<std::sync::atomic::AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    thread: Option<std::thread::JoinHandle<()>>,
}

/// Start toggling `source` every `half_period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_blink_timer(source: &'static BlinkSource, half_period_ms: u32) -> Result<BlinkTimer> {
    if half_period_ms == 0 {
        return Err(Error::Config("blink half-period must be non-zero"));
    }

    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    // SAFETY: the args struct outlives the create call; the callback
    // argument points at a `'static` BlinkSource.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(blink_tick_cb),
            arg: source as *const BlinkSource as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"blink".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &mut handle);
        if ret != ESP_OK {
            log::error!("hw_timer: blink timer create failed (rc={})", ret);
            return Err(Error::Init("blink timer create"));
        }
        let ret = esp_timer_start_periodic(handle, u64::from(half_period_ms) * 1_000);
        if ret != ESP_OK {
            log::error!("hw_timer: blink timer start failed (rc={})", ret);
            esp_timer_delete(handle);
            return Err(Error::Init("blink timer start"));
        }
    }

    info!("hw_timer: blink toggling every {half_period_ms} ms");
    Ok(BlinkTimer { handle })
}

#[cfg(not(target_os = "espidf"))]
pub fn start_blink_timer(source: &'static BlinkSource, half_period_ms: u32) -> Result<BlinkTimer> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    if half_period_ms == 0 {
        return Err(Error::Config("blink half-period must be non-zero"));
    }

    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let period = Duration::from_millis(u64::from(half_period_ms));
    let thread = std::thread::Builder::new()
        .name("blink".into())
        .spawn(move || {
            while !flag.load(Ordering::Acquire) {
                std::thread::sleep(period);
                source.toggle();
            }
        })
        .map_err(|_| Error::Init("blink thread spawn"))?;

    info!("hw_timer(sim): blink toggling every {half_period_ms} ms");
    Ok(BlinkTimer {
        stop,
        thread: Some(thread),
    })
}

impl Drop for BlinkTimer {
    fn drop(&mut self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: `handle` came from a successful esp_timer_create and is
        // released exactly once here.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.stop.store(true, std::sync::atomic::Ordering::Release);
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}
