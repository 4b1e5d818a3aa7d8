//! Phrase-level edits on a section element.
//!
//! Every function takes a section and returns a new, run-normalized one.
//! When the section has no content to anchor on, the edit degrades to
//! inserting a single text run.

use quill_core::constants::ASYNC_PREFIX;

use crate::comments::{parse_fragment, Element, Node};
use crate::linguistics::match_first_letter_case;

use super::runs::{
    first_content, framing_whitespace, last_content, normalize_element, split_leading_ws,
    split_trailing_ws,
};

/// Insert `phrase` (which may contain inline markup) at the start of the content.
///
/// A whitespace-only first node, and the leading whitespace of the first
/// text run, stay in front of the phrase.
pub fn prepend_phrase(section: &Element, phrase: &str) -> Element {
    prepend(section, phrase, false)
}

/// Like [`prepend_phrase`], but the old first word continues the sentence:
/// its first letter is lowercased unless it looks like an acronym or a name
/// written in code.
pub fn prepend_sentence(section: &Element, phrase: &str) -> Element {
    prepend(section, phrase, true)
}

fn prepend(section: &Element, phrase: &str, lowercase_rest: bool) -> Element {
    let mut inserted = parse_fragment(phrase);
    let children = &section.children;

    let Some(at) = first_content(children) else {
        let mut out = section.clone();
        out.children.extend(inserted);
        return normalize_element(out);
    };

    let mut new_children: Vec<Node> = children[..at].to_vec();
    match &children[at] {
        Node::Text(text) => {
            let (ws, rest) = split_leading_ws(text);
            let rest = if lowercase_rest { lowercase_first(rest) } else { rest.to_string() };
            new_children.push(Node::text(ws));
            if needs_space_between(phrase, &rest) {
                inserted.push(Node::text(" "));
            }
            new_children.extend(inserted);
            new_children.push(Node::Text(rest));
        }
        Node::Element(_) | Node::Comment(_) => {
            if needs_space_between(phrase, "x") {
                inserted.push(Node::text(" "));
            }
            new_children.extend(inserted);
            new_children.push(children[at].clone());
        }
    }
    new_children.extend_from_slice(&children[at + 1..]);

    let mut out = section.clone();
    out.children = new_children;
    normalize_element(out)
}

/// Insert `phrase` at the end of the content, before trailing whitespace.
///
/// When the content ends with a period and the phrase brings its own
/// closing period, the old period is dropped instead of doubled; a phrase
/// that starts a new sentence (capital first letter) keeps it.
pub fn append_phrase(section: &Element, phrase: &str) -> Element {
    let children = &section.children;

    let Some(at) = last_content(children) else {
        let mut out = section.clone();
        let (leading, _) = framing_whitespace(children);
        out.children = vec![Node::Text(leading)];
        out.children.extend(parse_fragment(phrase));
        return normalize_element(out);
    };

    let starts_sentence = phrase.trim_start().starts_with(char::is_uppercase);
    let mut new_children: Vec<Node> = children[..at].to_vec();
    let mut tail_ws = String::new();

    match &children[at] {
        Node::Text(text) => {
            let (body, ws) = split_trailing_ws(text);
            tail_ws.push_str(ws);
            let body = match body.strip_suffix('.') {
                Some(stripped) if phrase.trim_end().ends_with('.') && !starts_sentence => stripped,
                _ => body,
            };
            new_children.push(Node::text(body));
            if needs_space_between(body, phrase) {
                new_children.push(Node::text(" "));
            }
        }
        Node::Element(_) | Node::Comment(_) => {
            new_children.push(children[at].clone());
            if needs_space_between("x", phrase) {
                new_children.push(Node::text(" "));
            }
        }
    }
    new_children.extend(parse_fragment(phrase));
    new_children.push(Node::Text(tail_ws));
    new_children.extend_from_slice(&children[at + 1..]);

    let mut out = section.clone();
    out.children = new_children;
    normalize_element(out)
}

/// Replace the first word when it equals `old` (ignoring case and trailing
/// punctuation). A leading "Asynchronously" is skipped, not replaced.
/// Sections whose first word differs come back unchanged.
pub fn replace_leading_word(section: &Element, old: &str, new: &str) -> Element {
    let mut out = section.clone();
    let Some(at) = first_content(&out.children) else {
        return normalize_element(out);
    };
    let Node::Text(text) = &out.children[at] else {
        return normalize_element(out);
    };

    let (ws, body) = split_leading_ws(text);
    let (prefix, body) = split_async_prefix(body);
    let word_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let token = &body[..word_end];
    let word = token.trim_end_matches(['.', ',', ';', ':', '?', '!']);

    if word.is_empty() || !word.eq_ignore_ascii_case(old) {
        return normalize_element(out);
    }

    let replacement = match_first_letter_case(word, new);
    let replaced = format!("{ws}{prefix}{replacement}{}", &body[word.len()..]);
    out.children[at] = Node::Text(replaced);
    normalize_element(out)
}

/// Replace all content with `text`, keeping the section's framing whitespace.
pub fn replace_section_text(section: &Element, text: &str) -> Element {
    let (leading, trailing) = framing_whitespace(&section.children);
    let mut children = vec![Node::Text(leading)];
    children.extend(parse_fragment(text));
    children.push(Node::Text(trailing));

    let mut out = section.clone();
    out.children = children;
    normalize_element(out)
}

fn split_async_prefix(body: &str) -> (&str, &str) {
    let Some(head) = body.get(..ASYNC_PREFIX.len()) else {
        return ("", body);
    };
    let rest = &body[ASYNC_PREFIX.len()..];
    if head.eq_ignore_ascii_case(ASYNC_PREFIX) && rest.starts_with(char::is_whitespace) {
        let skipped = ASYNC_PREFIX.len() + (rest.len() - rest.trim_start().len());
        (&body[..skipped], &body[skipped..])
    } else {
        ("", body)
    }
}

/// A single space is needed unless one side already has whitespace or the
/// right side opens with punctuation.
fn needs_space_between(left: &str, right: &str) -> bool {
    let left_ok = left.chars().next_back().is_some_and(|c| !c.is_whitespace());
    let right_ok = right
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace() && !matches!(c, '.' | ',' | ';' | ':' | '?' | '!' | ')'));
    left_ok && right_ok
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase() => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(&text[first.len_utf8()..]);
            out
        }
        _ => text.to_string(),
    }
}
