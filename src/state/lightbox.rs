//! Lightbox navigator and place modal state
//!
//! The lightbox is a positional cursor over the gallery image list. It does
//! not own the list: the controller rebuilds the list on every re-derivation
//! and calls [`Lightbox::rebase`] so the cursor stays in bounds.

/// The UI element that opened an overlay, to be focused again on close
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// A place card, by place id
    Card(String),
    /// A featured strip tile, by place id
    FeaturedTile(String),
    /// A gallery figure, by owning place and position among that place's
    /// images. Stable across re-derivations that reorder the gallery.
    GalleryFigure { place_id: String, image: usize },
}

/// Lightbox step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        index: usize,
        trigger: FocusTarget,
    },
}

impl Lightbox {
    /// Open at `index`. Ignored (returns false) if `index` is not a valid
    /// position in a list of `len` images.
    pub fn open(&mut self, index: usize, len: usize, trigger: FocusTarget) -> bool {
        if index >= len {
            return false;
        }
        *self = Lightbox::Open { index, trigger };
        true
    }

    /// Move one image, wrapping at both ends. No-op when closed or when the
    /// list is empty.
    pub fn step(&mut self, direction: Direction, len: usize) {
        if len == 0 {
            return;
        }
        if let Lightbox::Open { index, .. } = self {
            *index = match direction {
                Direction::Next => (*index + 1) % len,
                Direction::Previous => (*index + len - 1) % len,
            };
        }
    }

    /// Close and hand back the element that opened the lightbox
    pub fn close(&mut self) -> Option<FocusTarget> {
        match std::mem::take(self) {
            Lightbox::Open { trigger, .. } => Some(trigger),
            Lightbox::Closed => None,
        }
    }

    /// Keep the cursor valid after the backing list was rebuilt with `len`
    /// entries: clamp to the last entry, or close if the list is now empty.
    pub fn rebase(&mut self, len: usize) {
        if let Lightbox::Open { index, .. } = self {
            if len == 0 {
                *self = Lightbox::Closed;
            } else if *index >= len {
                *index = len - 1;
            }
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Open { index, .. } => Some(*index),
            Lightbox::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    /// `items[index]` when open and in bounds, nothing otherwise
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.index().and_then(|index| items.get(index))
    }
}

/// Place detail modal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Open {
        place_id: String,
        trigger: FocusTarget,
    },
}

impl Modal {
    pub fn open(&mut self, place_id: String, trigger: FocusTarget) {
        *self = Modal::Open { place_id, trigger };
    }

    pub fn close(&mut self) -> Option<FocusTarget> {
        match std::mem::take(self) {
            Modal::Open { trigger, .. } => Some(trigger),
            Modal::Closed => None,
        }
    }

    pub fn place_id(&self) -> Option<&str> {
        match self {
            Modal::Open { place_id, .. } => Some(place_id),
            Modal::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn figure(image: usize) -> FocusTarget {
        FocusTarget::GalleryFigure {
            place_id: "p1".to_string(),
            image,
        }
    }

    fn opened(index: usize, len: usize) -> Lightbox {
        let mut lightbox = Lightbox::default();
        assert!(lightbox.open(index, len, figure(index)));
        lightbox
    }

    #[test]
    fn test_open_rejects_out_of_range() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.open(3, 3, figure(3)));
        assert!(!lightbox.is_open());
        assert!(!lightbox.open(0, 0, figure(0)));
    }

    #[test]
    fn test_step_wraps_both_ends() {
        let mut lightbox = opened(2, 3);
        lightbox.step(Direction::Next, 3);
        assert_eq!(lightbox.index(), Some(0));
        lightbox.step(Direction::Previous, 3);
        assert_eq!(lightbox.index(), Some(2));
    }

    #[test]
    fn test_step_on_empty_or_closed_is_noop() {
        let mut lightbox = opened(0, 1);
        lightbox.step(Direction::Next, 0);
        assert_eq!(lightbox.index(), Some(0));

        let mut closed = Lightbox::Closed;
        closed.step(Direction::Next, 5);
        assert_eq!(closed, Lightbox::Closed);
    }

    #[test]
    fn test_close_returns_trigger() {
        let mut lightbox = opened(1, 4);
        assert_eq!(lightbox.close(), Some(figure(1)));
        assert_eq!(lightbox.close(), None);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_current_is_bounds_checked() {
        let items = vec!["a", "b", "c"];
        let lightbox = opened(1, 3);
        assert_eq!(lightbox.current(&items), Some(&"b"));
        assert_eq!(lightbox.current::<&str>(&[]), None);
        assert_eq!(Lightbox::Closed.current(&items), None);
    }

    #[test]
    fn test_rebase_clamps_or_closes() {
        let mut lightbox = opened(4, 5);
        lightbox.rebase(2);
        assert_eq!(lightbox.index(), Some(1));

        lightbox.rebase(10);
        assert_eq!(lightbox.index(), Some(1));

        lightbox.rebase(0);
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_modal_open_close() {
        let mut modal = Modal::default();
        modal.open("p1".to_string(), FocusTarget::Card("p1".to_string()));
        assert_eq!(modal.place_id(), Some("p1"));
        assert_eq!(modal.close(), Some(FocusTarget::Card("p1".to_string())));
        assert!(!modal.is_open());
    }

    proptest! {
        #[test]
        fn prop_n_steps_return_to_start(len in 1usize..50, start in 0usize..50) {
            let start = start % len;
            let mut lightbox = opened(start, len);
            for _ in 0..len {
                lightbox.step(Direction::Next, len);
            }
            prop_assert_eq!(lightbox.index(), Some(start));
        }

        #[test]
        fn prop_previous_undoes_next(len in 1usize..50, start in 0usize..50) {
            let start = start % len;
            let mut lightbox = opened(start, len);
            lightbox.step(Direction::Next, len);
            lightbox.step(Direction::Previous, len);
            prop_assert_eq!(lightbox.index(), Some(start));
        }
    }
}
