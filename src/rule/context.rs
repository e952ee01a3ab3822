/// Elements whose content is never user-facing translatable text.
pub const IGNORED_ELEMENTS: &[&str] = &["pre", "script", "style", "template", "textarea"];

/// Whether inspection happens at the current depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    OutsideIgnored,
    InsideIgnored,
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    state: ElementState,
}

/// Stack of currently open elements for one template traversal.
///
/// Each entry remembers the state it was entered with, so popping an element
/// restores its parent's state.
#[derive(Debug, Default)]
pub struct ElementContext {
    stack: Vec<OpenElement>,
}

impl ElementContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: &str) {
        let state = if self.state() == ElementState::InsideIgnored || IGNORED_ELEMENTS.contains(&tag)
        {
            ElementState::InsideIgnored
        } else {
            ElementState::OutsideIgnored
        };
        self.stack.push(OpenElement {
            tag: tag.to_string(),
            state,
        });
    }

    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop().map(|element| element.tag)
    }

    pub fn state(&self) -> ElementState {
        self.stack
            .last()
            .map_or(ElementState::OutsideIgnored, |element| element.state)
    }

    pub fn is_ignored(&self) -> bool {
        self.state() == ElementState::InsideIgnored
    }

    /// Tag of the innermost open element.
    pub fn current_tag(&self) -> Option<&str> {
        self.stack.last().map(|element| element.tag.as_str())
    }
}
