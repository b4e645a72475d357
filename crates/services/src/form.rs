//! Form state owned by the controller: the text fields, the star picker
//! selection and the hint shown beside it.

use domains::{Rating, ValidationError, FILLED_STAR, MAX_RATING};

use crate::submission::ReviewDraft;

/// The line under the star picker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RatingHint {
    #[default]
    Prompt,
    Selected(Rating),
    /// Shown after a rejected submission until the user picks a star.
    Invalid(ValidationError),
}

impl RatingHint {
    pub fn text(&self) -> String {
        match self {
            RatingHint::Prompt => "Select a rating".to_string(),
            RatingHint::Selected(r) => format!("Selected: {}/{}", r, MAX_RATING),
            RatingHint::Invalid(e) => format!("⚠️ {}", e.user_message()),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, RatingHint::Invalid(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub title: String,
    pub message: String,
    rating: Option<Rating>,
    hint: RatingHint,
}

impl FormState {
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn hint(&self) -> &RatingHint {
        &self.hint
    }

    /// `None` clears the picker.
    pub fn select_rating(&mut self, rating: Option<Rating>) {
        self.rating = rating;
        self.hint = match rating {
            Some(r) => RatingHint::Selected(r),
            None => RatingHint::Prompt,
        };
    }

    /// Live character counter for the message box.
    pub fn message_len(&self) -> usize {
        self.message.chars().count()
    }

    /// Five picker stars, `true` for each active one.
    pub fn picker(&self) -> [bool; MAX_RATING as usize] {
        let selected = self.rating.map(Rating::value).unwrap_or(0);
        std::array::from_fn(|i| (i as u8) < selected)
    }

    pub fn picker_text(&self) -> String {
        self.picker()
            .iter()
            .map(|active| if *active { FILLED_STAR } else { '·' })
            .collect()
    }

    pub fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            name: self.name.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            rating: self.rating.map(|r| i64::from(r.value())),
        }
    }

    pub(crate) fn reject(&mut self, error: ValidationError) {
        self.hint = RatingHint::Invalid(error);
    }

    /// Back to the initial empty form with nothing selected.
    pub fn reset(&mut self) {
        *self = FormState::default();
    }
}
