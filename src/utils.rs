/// Normalizes a raw track title into its canonical guessing form.
///
/// Provider titles carry decoration that has no place in a guess: bracketed
/// asides like `(feat. artist)`, ` - artist remix` spans, `feat.` tails,
/// `radio edit` / `remastered` markers and similar noise. The result is
/// lower-cased with whitespace collapsed to single spaces, so a guess can be
/// compared with a plain string equality.
pub fn format_songname(song_name: &str) -> String {
    let mut name = song_name.to_lowercase();

    // Bracketed asides, e.g. "(feat. artist)" or "(with artist)".
    while let (Some(start), Some(end)) = (name.find('('), name.find(')')) {
        if start > end {
            break;
        }
        name.replace_range(start..=end, "");
    }

    // " - <artist> remix" spans.
    if let (Some(start), Some(end)) = (name.find(" - "), name.find("remix")) {
        if start < end {
            let stop = (end + "remix".len()).min(name.len());
            name.replace_range(start..stop, "");
        }
    }

    // "feat." outside of brackets swallows the rest of the title.
    if let Some(start) = name.find("feat.") {
        name.truncate(start);
    }

    const TERMS: [(&str, &str); 9] = [
        ("radio edit", ""),
        (" - ", " "),
        (",", " "),
        ("remastered", ""),
        ("[remix]", ""),
        ("film version", ""),
        (".", ""),
        ("spider-man: into the spider-verse", ""),
        ("from \"watership down\"", ""),
    ];

    for (from, to) in TERMS {
        name = name.replace(from, to);
    }

    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts a formatted song name into its obscured "to guess" form.
///
/// The first alphabetic character of every word is revealed upper-cased,
/// every further alphabetic character becomes an underscore, and
/// non-alphabetic characters are kept verbatim:
///
/// ```text
/// viva la vida -> V___ L_ V___
/// sandstorm    -> S________
/// ```
pub fn blank_songname(song_name: &str) -> String {
    song_name
        .split(' ')
        .map(|word| {
            let mut guess = String::new();
            let mut had_first = false;

            for ch in word.chars() {
                if ch.is_alphabetic() {
                    if had_first {
                        guess.push('_');
                    } else {
                        guess.extend(ch.to_uppercase());
                        had_first = true;
                    }
                } else {
                    guess.push(ch);
                }
            }

            guess
        })
        .collect::<Vec<_>>()
        .join(" ")
}
