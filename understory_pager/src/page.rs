// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What a logical page holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageKind {
    /// A zoomable image. Its engine becomes ready once the host reports the
    /// natural size.
    #[default]
    Image,
    /// Any other content. Never zoomable; drags on it only swipe.
    Static,
}

impl PageKind {
    /// Returns `true` for [`PageKind::Image`].
    #[must_use]
    pub fn is_image(self) -> bool {
        self == Self::Image
    }
}
