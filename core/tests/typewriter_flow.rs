//! End-to-end scheduler scenarios
//!
//! These tests drive full effect scripts against the in-memory surface on a
//! 1ms frame clock under paused tokio time, so every run is deterministic
//! and instant regardless of the configured delays.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use typewriter_core::surface::{shared_surface, BufferSurface};
use typewriter_core::{
    CompletionSignal, FixedRateClock, Module, ModuleKind, SharedSurface, StepOptions, Typewriter,
    TypewriterConfig, TypewriterError,
};

fn instant_config() -> TypewriterConfig {
    TypewriterConfig {
        delay_ms: 0,
        fluctuation_ms: 0,
        ..TypewriterConfig::default()
    }
}

fn typewriter(initial: &str, config: TypewriterConfig) -> (Typewriter, SharedSurface) {
    let surface = shared_surface(BufferSurface::with_text(initial));
    let tw = Typewriter::with_clock(
        Arc::clone(&surface),
        Arc::new(FixedRateClock::new(Duration::from_millis(1))),
        config,
    );
    (tw, surface)
}

#[tokio::test(start_paused = true)]
async fn test_write_appends_to_existing_text() {
    let (mut tw, surface) = typewriter("> ", instant_config());
    tw.write("abc");
    tw.start().await.unwrap();

    assert_eq!(surface.lock().text(), "> abc");
    assert_eq!(tw.current(), None);
}

#[tokio::test(start_paused = true)]
async fn test_backspace_leaves_prefix() {
    let (mut tw, surface) = typewriter("hello", instant_config());
    tw.backspace(2);
    tw.start().await.unwrap();

    assert_eq!(surface.lock().text(), "hel");
}

#[tokio::test(start_paused = true)]
async fn test_full_rewrite_script() {
    let (mut tw, surface) = typewriter("", instant_config());
    tw.write_opts("ala ma kota", StepOptions::new().with_delay_ms(0))
        .sleep(1500)
        .rewrite(4, "diabla a nie kota");
    tw.start().await.unwrap();

    assert_eq!(surface.lock().text(), "ala ma diabla a nie kota");
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_the_surface_and_resume_finishes() {
    let (mut tw, surface) = typewriter("", instant_config());
    tw.write("abcdef");
    let handle = tw.handle();

    let task = tokio::spawn(async move { tw.start().await });

    // A few frames in, mid-write
    tokio::time::sleep(Duration::from_millis(3)).await;
    assert_eq!(handle.current(), Some(ModuleKind::Write));
    handle.pause();
    assert!(handle.is_paused());

    tokio::time::sleep(Duration::from_millis(10)).await;
    let frozen = surface.lock().text();
    assert!(!frozen.is_empty() && frozen.len() < 6, "got {frozen:?}");

    // Paused time passing changes nothing
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(surface.lock().text(), frozen);

    handle.resume();
    task.await.unwrap().unwrap();
    assert_eq!(surface.lock().text(), "abcdef");
}

#[tokio::test(start_paused = true)]
async fn test_repeat_cycles_until_stopped_then_restores() {
    let (mut tw, surface) = typewriter(
        "init",
        TypewriterConfig {
            repeat: true,
            sleep_before_repeat_ms: 500,
            delay_ms: 0,
            fluctuation_ms: 0,
            ..TypewriterConfig::default()
        },
    );
    tw.write("ab");
    let handle = tw.handle();

    let task = tokio::spawn(async move { tw.start().await });

    // First cycle finishes within a few frames, then the boundary sleep runs
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(surface.lock().text(), "initab");
    assert_eq!(handle.current(), Some(ModuleKind::TimedSleep));

    // Past the 500ms boundary the cursor wraps and the script runs again
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(surface.lock().text(), "initabab");

    handle.stop();
    task.await.unwrap().unwrap();
    assert_eq!(surface.lock().text(), "init");
    assert_eq!(handle.current(), None);
}

#[tokio::test(start_paused = true)]
async fn test_pause_does_not_interrupt_delete() {
    let (mut tw, surface) = typewriter("hello!", instant_config());
    tw.delete(3);
    let handle = tw.handle();

    let task = tokio::spawn(async move { tw.start().await });
    tokio::task::yield_now().await;

    // Delete is in flight and not pausable
    assert_eq!(handle.current(), Some(ModuleKind::Delete));
    handle.pause();
    assert!(!handle.is_paused());

    task.await.unwrap().unwrap();
    assert_eq!(surface.lock().text(), "hel");
}

#[tokio::test(start_paused = true)]
async fn test_restart_runs_the_script_again() {
    let (mut tw, surface) = typewriter("", instant_config());
    tw.write("ab");
    tw.start().await.unwrap();
    assert_eq!(surface.lock().text(), "ab");

    // No re-normalization, same steps from the top
    tw.restart().await.unwrap();
    assert_eq!(surface.lock().text(), "abab");
}

/// Caller-supplied step: reverses the surface text in one frame.
struct ReverseModule {
    surface: SharedSurface,
}

#[async_trait]
impl Module for ReverseModule {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Custom("reverse")
    }

    async fn action(&mut self) -> Result<CompletionSignal, TypewriterError> {
        let mut surface = self.surface.lock();
        let reversed: String = surface.text().chars().rev().collect();
        surface
            .set_text(reversed)
            .map_err(TypewriterError::Surface)?;
        Ok(CompletionSignal::done(self.kind()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_custom_step_is_scheduled_verbatim() {
    let (mut tw, surface) = typewriter("", instant_config());
    tw.write("abc").step(Box::new(ReverseModule {
        surface: Arc::clone(&surface),
    }));
    tw.init();

    // Spacing lands after the write; the custom step gets none
    assert_eq!(
        tw.step_kinds(),
        vec![
            ModuleKind::Write,
            ModuleKind::FrameSleep,
            ModuleKind::Custom("reverse"),
        ]
    );

    tw.restart().await.unwrap();
    assert_eq!(surface.lock().text(), "cba");
}
