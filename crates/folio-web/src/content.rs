#![forbid(unsafe_code)]

//! Static site content: the about paragraph and its keyword table.

use folio_text::{KeywordAction, KeywordDescriptor, KeywordSet};

/// Route of the about page.
pub const ABOUT_ROUTE: &str = "/about";

/// Document title of the about page.
pub const ABOUT_TITLE: &str = "about tony.";

/// The about paragraph, revealed grapheme by grapheme.
pub const ABOUT_TEXT: &str = concat!(
    "i'm tony toskalio. together with my five brothers and one sister, i was born and raised in austria, with roots tracing back to romania. since childhood, i've found joy in watching tv, drawing, and flipping through old books at thrift stores, early habits that likely sparked my fascination with visual media. growing up in a big family also shaped me into a fairly social creature.\n",
    "this passion led me to work on a variety of creative projects where i’ve collaborated with talented minds to bring ideas to life. one of the most meaningful of these was my syπthesizer. project, my diploma thesis, where i designed not only the physical enclosure of a modern synthesizer but also its control interface and user interaction model. working on this project sparked a deeper curiosity for sound and ultimately ignited my interest in making music. that also led me to experiment with music visualizers and explore how sound can shape visuals in real time. naturally, this opened the door to vibe coding and the intersection of code, design, and motion.\n",
    "another highlight is the mundane, a short film i directed that was exhibited during the open house event at htl donaustadt. i tend to keep my creative scope broad, experimenting across disciplines — a mindset shaped deeply by my father, whose work ethic and hands-on skill have always inspired me.\n",
    "currently, i'm focused on graphic and logo design, typography, photography, and vibe coding visual art installations. i also dabble in blender from time to time. in the near future, i plan to dive deeper into video production and hardware design, from pcb layouts to cad modeling and 3d printing.",
);

/// `(word, href, class)` rows of the about page link table.
///
/// `href` follows the anchor convention understood by
/// [`KeywordAction::from_href`].
const ABOUT_LINKS: [(&str, &str, &str); 8] = [
    ("tony toskalio", "/", "about-link-tony"),
    ("syπthesizer.", "https://synthesizer.cargo.site", "about-link-synth"),
    ("htl donaustadt", "https://htl-donaustadt.at", "about-link-htl"),
    ("social", "/socials", "about-link-social"),
    ("drawing", "#", "about-link-drawing"),
    ("the mundane", "/mundane", "about-link-mundane"),
    ("graphic and logo design", "#", "about-link-graphic"),
    ("photography", "#", "about-link-photo"),
];

/// The about page keyword table, in declaration order.
#[must_use]
pub fn about_keywords() -> KeywordSet {
    ABOUT_LINKS
        .iter()
        .map(|&(word, href, class)| {
            KeywordDescriptor::new(word, KeywordAction::from_href(href)).with_class(class)
        })
        .collect::<Vec<_>>()
        .into()
}
