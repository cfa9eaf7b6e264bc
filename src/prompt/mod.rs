pub mod automotive;
pub mod food;
pub mod generic;
pub mod interior;
pub mod lifestyle;
pub mod product;

use rand::Rng;

use crate::options::{Domain, DomainOptions};

/// Ordered prompt sections. Blank sections are dropped so optional blocks
/// never leave double separators behind.
pub struct PromptSections {
    separator: &'static str,
    sections: Vec<String>,
}

impl PromptSections {
    pub fn new(separator: &'static str) -> Self {
        Self {
            separator,
            sections: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, section: impl Into<String>) {
        let section = section.into();
        if !section.trim().is_empty() {
            self.sections.push(section);
        }
    }

    pub fn push_if(&mut self, condition: bool, section: impl FnOnce() -> String) {
        if condition {
            self.push(section());
        }
    }

    pub fn push_opt(&mut self, section: Option<String>) {
        if let Some(section) = section {
            self.push(section);
        }
    }

    pub fn finish(self) -> String {
        self.sections.join(self.separator)
    }
}

/// Maps a slider onto the first band whose inclusive upper bound holds it.
/// Bands must be sorted ascending; anything above the last bound gets `top`.
pub(crate) fn tier<T: Copy>(value: i32, bands: &[(i32, T)], top: T) -> T {
    bands
        .iter()
        .find(|(bound, _)| value <= *bound)
        .map(|(_, label)| *label)
        .unwrap_or(top)
}

/// Builds the instruction for a normalized options record. Only the product
/// lifestyle path draws from `rng`.
pub fn build_prompt<R: Rng + ?Sized>(options: &DomainOptions, rng: &mut R) -> String {
    match options {
        DomainOptions::Interior(options) => interior::build_interior_prompt(options),
        DomainOptions::Product(options) => product::build_product_prompt(options, rng),
        DomainOptions::Food(options) => food::build_food_prompt(options),
        DomainOptions::Automotive(options) => automotive::build_auto_prompt(options),
        DomainOptions::People(options) => generic::build_generic_prompt(Domain::People, options),
        DomainOptions::General(options) => generic::build_generic_prompt(Domain::General, options),
    }
}

pub fn prompt_preview(prompt: &str, max_chars: usize) -> String {
    if prompt.chars().count() <= max_chars {
        return prompt.to_string();
    }
    let mut preview: String = prompt.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
