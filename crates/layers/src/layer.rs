/// Handle a map backend hands out for a layer it has attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Tiles,
    Marker,
}

pub trait Layer {
    fn kind(&self) -> LayerKind;
}
