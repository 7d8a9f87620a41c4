// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass-through configuration owned by the text editor.
//!
//! None of these values affect height computation. The growing text view only
//! forwards them, and their semantics belong to the [`TextEditor`](crate::TextEditor)
//! implementation and the platform behind it.

use peniko::Color;

use crate::editor::{AttributedText, TextAttributes};

bitflags::bitflags! {
    /// Kinds of content the editor should detect and turn into interactive runs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DataDetectorTypes: u32 {
        /// Phone numbers.
        const PHONE_NUMBER = 1 << 0;
        /// URLs and email addresses.
        const LINK = 1 << 1;
        /// Postal addresses.
        const ADDRESS = 1 << 2;
        /// Dates and times that could become calendar events.
        const CALENDAR_EVENT = 1 << 3;
        /// Parcel tracking numbers.
        const SHIPMENT_TRACKING_NUMBER = 1 << 4;
        /// Flight numbers.
        const FLIGHT_NUMBER = 1 << 5;
        /// Terms with a lookup suggestion.
        const LOOKUP_SUGGESTION = 1 << 6;
    }
}

impl Default for DataDetectorTypes {
    fn default() -> Self {
        Self::empty()
    }
}

/// Horizontal alignment of text lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Align to the leading edge for the writing direction.
    #[default]
    Natural,
    /// Align to the left edge.
    Left,
    /// Center lines.
    Center,
    /// Align to the right edge.
    Right,
    /// Stretch lines to fill the width.
    Justified,
}

/// Keyboard layout requested from the input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyboardType {
    /// The platform default.
    #[default]
    Default,
    /// Plain ASCII characters.
    Ascii,
    /// Digits and punctuation.
    NumbersAndPunctuation,
    /// URL entry.
    Url,
    /// Digits only.
    NumberPad,
    /// Phone number entry.
    PhonePad,
    /// Email address entry.
    EmailAddress,
    /// Digits with a decimal separator.
    DecimalPad,
    /// Handle and hashtag entry.
    Twitter,
    /// Web search entry.
    WebSearch,
}

/// Whether the input system should autocorrect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AutocorrectionType {
    /// Follow the platform setting.
    #[default]
    Default,
    /// Never autocorrect.
    No,
    /// Always autocorrect.
    Yes,
}

/// Label for the return key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReturnKeyType {
    /// Plain return.
    #[default]
    Default,
    /// "Go".
    Go,
    /// "Search".
    Search,
    /// "Send".
    Send,
    /// "Next".
    Next,
    /// "Done".
    Done,
}

/// Host-defined handle for a custom input view or accessory view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputViewId(pub u64);

/// Editor configuration forwarded verbatim by the growing text view.
#[derive(Clone, Debug)]
pub struct TextTraits {
    /// Base text color.
    pub text_color: Color,
    /// Line alignment.
    pub alignment: TextAlignment,
    /// Content kinds turned into interactive runs.
    pub data_detector_types: DataDetectorTypes,
    /// Whether text can be selected.
    pub selectable: bool,
    /// Whether the user may edit text attributes (bold, italic, ...).
    pub allows_editing_text_attributes: bool,
    /// Attributes applied to newly typed text.
    pub typing_attributes: TextAttributes,
    /// Attributes applied to link runs.
    pub link_attributes: TextAttributes,
    /// Requested keyboard layout.
    pub keyboard_type: KeyboardType,
    /// Requested autocorrection behavior.
    pub autocorrection_type: AutocorrectionType,
    /// Return key label.
    pub return_key_type: ReturnKeyType,
    /// Custom input view replacing the system keyboard.
    pub input_view: Option<InputViewId>,
    /// Accessory view shown above the keyboard.
    pub input_accessory_view: Option<InputViewId>,
    /// Whether inserting text replaces the previous content.
    pub clears_on_insertion: bool,
    /// Text shown while the editor is empty.
    pub placeholder: Option<AttributedText>,
}

impl Default for TextTraits {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            alignment: TextAlignment::default(),
            data_detector_types: DataDetectorTypes::default(),
            selectable: true,
            allows_editing_text_attributes: false,
            typing_attributes: TextAttributes::default(),
            link_attributes: TextAttributes::default(),
            keyboard_type: KeyboardType::default(),
            autocorrection_type: AutocorrectionType::default(),
            return_key_type: ReturnKeyType::default(),
            input_view: None,
            input_accessory_view: None,
            clears_on_insertion: false,
            placeholder: None,
        }
    }
}
