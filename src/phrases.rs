//! Built-in text: meme captions, ticker headlines and burst callouts.
//!
//! All lists are immutable statics; callers pick from them but never modify them.

/// A top/bottom caption pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptionPair {
    /// Caption drawn near the top edge.
    pub top: &'static str,
    /// Caption drawn near the bottom edge.
    pub bottom: &'static str,
}

const fn pair(top: &'static str, bottom: &'static str) -> CaptionPair {
    CaptionPair { top, bottom }
}

/// Captions used by random generation.
pub static MEME_TEXTS: &[CaptionPair] = &[
    pair("when u a potato", "but also a cat person"),
    pair("i can haz", "potato?"),
    pair("tater tot", "reporting for duty"),
    pair("am not cat", "am potato"),
    pair("potato cat", "the hero we deserve"),
    pair("one does not simply", "combine potatoes and cats"),
    pair("they told me i could be anything", "so i became a potato cat"),
    pair("this is fine", "everything is potato"),
    pair("cat.exe has stopped working", "potato.dll loaded instead"),
    pair("when the catnip hits", "and you become a potato"),
    pair("i showed you my potato", "please respond"),
    pair("therapist: potato cat isn't real", "potato cat:"),
    pair("nobody:", "potato cat at 3am:"),
    pair("me: i'm a normal person", "also me:"),
    pair("the last thing you see", "before you get mashed"),
    pair("you've been visited by", "the sacred potato cat"),
    pair("this image is cursed", "you're welcome"),
    pair("mom can we have a cat", "we have a cat at home. the cat at home:"),
    pair(
        "roses are red",
        "potatoes are brown. this meme is cursed. please sit down",
    ),
    pair("i have achieved", "peak internet"),
    pair("delete this", "nephew"),
    pair("what in tarnation", "is this abomination"),
    pair("thanks i hate it", "potato cat forever"),
    pair("it's not a phase mom", "i'm a potato cat now"),
    pair("the prophecy is true", "the potato cat has risen"),
];

/// Headlines for the scrolling ticker banner.
pub static TICKER_MESSAGES: &[&str] = &[
    "BREAKING: LOCAL POTATO ACHIEVES SENTIENCE, DEMANDS BELLY RUBS",
    "ALERT: SCIENTISTS CONFIRM CATS ARE 47% POTATO ON A MOLECULAR LEVEL",
    "DEVELOPING: POTATO-CAT HYBRID ESCAPES LAB, LAST SEEN HEADING TOWARD COUCH",
    "URGENT: WORLD POTATO SUPPLY NOW CONTROLLED BY CATS",
    "LIVE: POTATO ELECTED MAYOR OF INTERNET, CATS DEMAND RECOUNT",
    "THIS JUST IN: YOUR SCREEN IS NOW 100% MORE POTATO THAN BEFORE",
    "EXCLUSIVE: AREA CAT REFUSES TO ACKNOWLEDGE POTATO ROOMMATE",
];

/// Words printed inside comic bursts.
pub static BURST_WORDS: &[&str] = &[
    "POW!", "BAM!", "WOW!", "ZAP!", "BOOM!", "KAPOW!", "WHAM!", "OMG!", "SPUD!", "MEOW!",
];
