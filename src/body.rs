use std::cell::RefCell;
use std::rc::Rc;

use crate::comet::Comet;
use crate::context::DrawContext;
use crate::drawable::Drawable;
use crate::error::DrawResult;
use crate::nebula::Nebula;
use crate::star::Star;
use crate::surface::Surface;

/// Every kind of drawable a layer can hold.
///
/// The nebula is shared with the orchestrator so its intensity can be changed
/// without regenerating it.
#[derive(Debug, Clone)]
pub enum Body {
    Star(Star),
    Comet(Comet),
    Nebula(Rc<RefCell<Nebula>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Comet,
    Nebula,
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Star(_) => BodyKind::Star,
            Body::Comet(_) => BodyKind::Comet,
            Body::Nebula(_) => BodyKind::Nebula,
        }
    }
}

impl Drawable for Body {
    fn draw<S: Surface>(&mut self, draw: &DrawContext<S>) -> DrawResult {
        match self {
            Body::Star(star) => star.draw(draw),
            Body::Comet(comet) => comet.draw(draw),
            Body::Nebula(nebula) => nebula.borrow_mut().draw(draw),
        }
    }
}

impl From<Star> for Body {
    fn from(star: Star) -> Self {
        Body::Star(star)
    }
}

impl From<Comet> for Body {
    fn from(comet: Comet) -> Self {
        Body::Comet(comet)
    }
}

impl From<Rc<RefCell<Nebula>>> for Body {
    fn from(nebula: Rc<RefCell<Nebula>>) -> Self {
        Body::Nebula(nebula)
    }
}
