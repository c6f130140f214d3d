use crate::Element;

/// Any tag, for the ones without a shorthand below.
pub fn element(tag: &str) -> Element {
    Element::new(tag)
}

macro_rules! tags {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name() -> Element {
                Element::new(stringify!($name))
            }
        )*
    };
}

tags!(
    button, div, header, section, h1, h3, h4, p, span, strong, ul, li, textarea, table, tr, th,
    td,
);
