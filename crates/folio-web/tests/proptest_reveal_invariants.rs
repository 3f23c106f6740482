//! Property-based invariant tests for the reveal animator and overlay renderer.
//!
//! 1. Rendered node contents concatenate to the first `k` graphemes, for every `k`.
//! 2. The visible prefix never shrinks while animating.
//! 3. Pausing for any duration and resuming preserves the visible prefix.
//! 4. Once done, further ticks change nothing.
//! 5. Links appear only once the reveal is complete.

use core::time::Duration;

use folio_runtime::{RevealAnimator, RevealConfig, RevealMode, render};
use folio_text::GraphemeIndex;
use folio_web::WebHost;
use folio_web::content::{ABOUT_TEXT, about_keywords};
use proptest::prelude::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn animator() -> RevealAnimator {
    RevealAnimator::new(RevealConfig::default().with_char_duration(ms(1)))
}

#[test]
fn every_prefix_of_the_about_text_round_trips() {
    let mut host = WebHost::new();
    let keywords = about_keywords();
    let index = GraphemeIndex::new(ABOUT_TEXT);
    let mut reveal = animator();
    reveal.assign(ABOUT_TEXT, &mut host);

    for k in 0..=index.len() {
        assert_eq!(reveal.tick(ms(k as u64)), k);
        let joined: String = render(&reveal, &keywords, false)
            .iter()
            .map(|n| n.content())
            .collect();
        assert_eq!(joined, index.prefix(ABOUT_TEXT, k));
    }
    assert_eq!(reveal.mode(), RevealMode::Done);
}

proptest! {
    #[test]
    fn prefix_is_monotonic(steps in proptest::collection::vec(0u64..40, 1..60)) {
        let mut host = WebHost::new();
        let mut reveal = animator();
        reveal.assign("syπthesizer. project, the mundane", &mut host);
        let mut now = 0;
        let mut last = 0;
        for step in steps {
            now += step;
            let visible = reveal.tick(ms(now));
            prop_assert!(visible >= last);
            prop_assert!(visible <= reveal.len());
            last = visible;
        }
    }

    #[test]
    fn pause_resume_continuity(pause_at in 0u64..30, idle in 0u64..100_000) {
        let mut host = WebHost::new();
        let mut reveal = animator();
        reveal.assign("graphic and logo design, typography", &mut host);

        host.clock_mut().advance(ms(pause_at));
        let before = reveal.tick(ms(pause_at));
        if reveal.pause(&mut host).is_ok() {
            host.clock_mut().advance(ms(idle));
            reveal.resume(&mut host).unwrap();
            prop_assert_eq!(reveal.tick(ms(pause_at + idle)), before);
        }
    }

    #[test]
    fn completion_is_idempotent(extra in proptest::collection::vec(0u64..1_000, 1..20)) {
        let mut host = WebHost::new();
        let mut reveal = animator();
        reveal.assign("drawing", &mut host);
        let mut now = 7;
        prop_assert_eq!(reveal.tick(ms(now)), 7);
        for step in extra {
            now += step;
            prop_assert_eq!(reveal.tick(ms(now)), 7);
            prop_assert_eq!(reveal.mode(), RevealMode::Done);
        }
    }

    #[test]
    fn links_only_after_completion(k in 0u64..200) {
        let mut host = WebHost::new();
        let keywords = about_keywords();
        let mut reveal = animator();
        reveal.assign(ABOUT_TEXT, &mut host);
        reveal.tick(ms(k));
        let links = render(&reveal, &keywords, false)
            .iter()
            .filter(|n| n.link().is_some())
            .count();
        prop_assert_eq!(links, 0);
    }
}
