// Test fixtures with known plaintext works and expected markup
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Two short chapters of prose with quotes, a dash and emphasis
pub const PROSE_TEXT: &str = r#"CHAPTER I

It was the best of times, it was the worst of times.
He said, "Don't go--yet."

CHAPTER II

_Nothing_ more.
"#;

/// Chapter pattern for PROSE_TEXT
pub const PROSE_CHAPTER: &str = "^CHAPTER";

/// Expected `tag --justified` output for PROSE_TEXT after classify and normalize -e -q -u
pub const PROSE_TAGGED: &str = r#"<ch id="ch1">CHAPTER I</ch>
<p>
<span class="line" id="l2"><word id="1">It</word> <word id="2">was</word> <word id="3">the</word> <word id="4">best</word> <word id="5">of</word> <word id="6">times,</word> <word id="7">it</word> <word id="8">was</word> <word id="9">the</word> <word id="10">worst</word> <word id="11">of</word> <word id="12">times.</word></span><br>
<span class="line" id="l3"><word id="13">He</word> <word id="14">said,</word> <word id="15">“Don’t</word> <word id="16">go—yet.”</word></span><br>
</p>
@1{}
<ch id="ch2">CHAPTER II</ch>
<p>
<span class="line" id="l2"><word id="17"><i>Nothing</i></word> <word id="18">more.</word></span><br>
</p>
@2{}"#;

/// Expected breaks file for PROSE_TEXT
pub const PROSE_BREAKS: &str = "1@1\n2@2\n";

/// Expected breaks file for PROSE_TEXT with titles recorded
pub const PROSE_BREAKS_TITLED: &str = "1@1@CHAPTER I\n2@2@CHAPTER II\n";

/// A play excerpt with an act heading and a stage direction
pub const PLAY_TEXT: &str = r#"ACT I

Enter HAMLET.

HAMLET. To be, or not to be--that is the question.
"#;

pub const PLAY_CHAPTER: &str = "^ACT";
pub const PLAY_STAGE: &str = "^(Enter|Exit|Exeunt)";

/// Expected full pipeline output for PLAY_TEXT with -e and --justified
pub const PLAY_EXPECTED: &str = r#"page@1@1
<ch id="ch1">ACT I</ch>
<p>
</p>
<stage><span class="line" id="l2"><word id="1">Enter</word> <word id="2">HAMLET.</word></span></stage><br>
<p>
<span class="line" id="l3"><word id="3">HAMLET.</word> <word id="4">To</word> <word id="5">be,</word> <word id="6">or</word> <word id="7">not</word> <word id="8">to</word> <word id="9">be—that</word> <word id="10">is</word> <word id="11">the</word> <word id="12">question.</word></span><br>
</p>
@1{}"#;

/// Book headings matched by the scripture preset
pub const SCRIPTURE_TEXT: &str = r#"The Gospel According to Saint Matthew

The book of the generation of Jesus Christ.

The Gospel According to Saint Mark

The beginning of the gospel.

Jonah

Now the word of the LORD came unto Jonah.
"#;

/// Verse with indentation preserved as &nbsp; markers
pub const VERSE_TEXT: &str = "Tyger Tyger, burning bright,\n  In the forests of the night;\n";

/// A long document of numbered paragraphs for pagination and throughput tests
pub fn generate_long_text(chapters: usize, paragraphs: usize, lines: usize) -> String {
    let mut result = String::new();
    for chapter in 1..=chapters {
        result.push_str(&format!("CHAPTER {chapter}\n\n"));
        for paragraph in 1..=paragraphs {
            for line in 1..=lines {
                result.push_str(&format!(
                    "Line {line} of paragraph {paragraph} says \"hello\" to the reader--twice.\n"
                ));
            }
            result.push('\n');
        }
    }
    result
}
