use tunequiz::utils::{blank_songname, format_songname};

#[test]
fn test_format_strips_brackets_and_remix_spans() {
    // Bracketed aside plus a trailing remix credit collapse to the bare title
    assert_eq!(format_songname("Symphony (feat. X) - Y Remix"), "symphony");

    // Multiple bracket pairs are all removed
    assert_eq!(
        format_songname("Title (with Someone) (Live) Here"),
        "title here"
    );
}

#[test]
fn test_format_strips_common_markers() {
    assert_eq!(
        format_songname("Don't Stop Me Now - Remastered 2011"),
        "don't stop me now 2011"
    );
    assert_eq!(format_songname("Song Radio Edit"), "song");
    assert_eq!(format_songname("Track [Remix]"), "track");
    assert_eq!(format_songname("Alive (Film Version)"), "alive");
}

#[test]
fn test_format_cuts_feat_outside_brackets() {
    // "feat." outside of brackets swallows the rest of the title
    assert_eq!(format_songname("Higher feat. Somebody Else"), "higher");
}

#[test]
fn test_format_lowercases_and_collapses_whitespace() {
    assert_eq!(format_songname("MiXeD   CaSe    NaMe"), "mixed case name");

    // Commas and dots disappear without gluing words together
    assert_eq!(format_songname("One, Two. Three"), "one two three");
}

#[test]
fn test_format_is_idempotent_on_clean_titles() {
    let clean = format_songname("Viva La Vida");
    assert_eq!(format_songname(&clean), clean);
}

#[test]
fn test_blank_reveals_one_letter_per_word() {
    assert_eq!(blank_songname("viva la vida"), "V___ L_ V___");
    assert_eq!(blank_songname("sandstorm"), "S________");

    // Exactly one placeholder per hidden letter
    assert_eq!(blank_songname("sandstorm").chars().count(), 9);
}

#[test]
fn test_blank_upcases_the_revealed_letter() {
    assert_eq!(
        blank_songname("harder better faster stronger"),
        "H_____ B_____ F_____ S_______"
    );
}

#[test]
fn test_blank_preserves_non_alphabetic_characters() {
    // The apostrophe stays where it is and is never blanked
    assert_eq!(blank_songname("don't stop"), "D__'_ S___");

    // Purely numeric words pass through verbatim
    assert_eq!(blank_songname("99 problems"), "99 P_______");
}

#[test]
fn test_blank_empty_input() {
    assert_eq!(blank_songname(""), "");
}
