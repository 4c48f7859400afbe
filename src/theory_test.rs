use super::*;

fn note(s: &str) -> Note {
    s.parse().unwrap()
}

// =============================================================
// Letter / Accidental
// =============================================================

#[test]
fn letter_semitones_span_one_octave() {
    assert_eq!(Letter::C.semitones_from_c(), 0);
    assert_eq!(Letter::E.semitones_from_c(), 4);
    assert_eq!(Letter::F.semitones_from_c(), 5);
    assert_eq!(Letter::B.semitones_from_c(), 11);
}

#[test]
fn accidental_offsets() {
    assert_eq!(Accidental::DoubleFlat.offset(), -2);
    assert_eq!(Accidental::Flat.offset(), -1);
    assert_eq!(Accidental::default().offset(), 0);
    assert_eq!(Accidental::Sharp.offset(), 1);
    assert_eq!(Accidental::DoubleSharp.offset(), 2);
}

// =============================================================
// Note parsing and display
// =============================================================

#[test]
fn parse_natural_note() {
    let n = note("E2");
    assert_eq!(n.letter, Letter::E);
    assert_eq!(n.accidental, Accidental::Natural);
    assert_eq!(n.octave, 2);
}

#[test]
fn parse_accidentals() {
    assert_eq!(note("C#4").accidental, Accidental::Sharp);
    assert_eq!(note("C##4").accidental, Accidental::DoubleSharp);
    assert_eq!(note("Bb3").accidental, Accidental::Flat);
    assert_eq!(note("Bbb3").accidental, Accidental::DoubleFlat);
}

#[test]
fn parse_negative_octave() {
    let n = note("C-1");
    assert_eq!(n.octave, -1);
    assert_eq!(n.midi(), 0);
}

#[test]
fn parse_rejects_octaves_outside_midi_range() {
    assert_eq!("E999999999".parse::<Note>(), Err(NoteParseError::OctaveOutOfRange(999_999_999)));
    assert_eq!("C10".parse::<Note>(), Err(NoteParseError::OctaveOutOfRange(10)));
    assert_eq!("C-2".parse::<Note>(), Err(NoteParseError::OctaveOutOfRange(-2)));
    assert!(matches!("E99999999999".parse::<Note>(), Err(NoteParseError::InvalidOctave(_))));
    assert_eq!(note("G9").midi(), 127);
}

#[test]
fn midi_saturates_for_unparseable_octaves() {
    assert_eq!(Note::new(Letter::E, Accidental::Natural, i32::MAX).midi(), i32::MAX);
    assert_eq!(Note::new(Letter::C, Accidental::Flat, i32::MIN).midi(), i32::MIN);
}

#[test]
fn parse_rejects_bad_input() {
    assert_eq!("".parse::<Note>(), Err(NoteParseError::Empty));
    assert_eq!("H2".parse::<Note>(), Err(NoteParseError::InvalidLetter('H')));
    assert!(matches!("Cx4".parse::<Note>(), Err(NoteParseError::InvalidAccidental(_))));
    assert!(matches!("C".parse::<Note>(), Err(NoteParseError::InvalidOctave(_))));
    assert!(matches!("C#".parse::<Note>(), Err(NoteParseError::InvalidOctave(_))));
}

#[test]
fn display_matches_parse_input() {
    for name in ["E2", "C#4", "Bb3", "F##5", "Abb0"] {
        assert_eq!(note(name).to_string(), name);
    }
}

// =============================================================
// MIDI
// =============================================================

#[test]
fn midi_numbers() {
    assert_eq!(note("C4").midi(), 60);
    assert_eq!(note("A4").midi(), 69);
    assert_eq!(note("E2").midi(), 40);
    assert_eq!(note("Cb4").midi(), 59);
}

#[test]
fn from_midi_spells_with_sharps() {
    assert_eq!(Note::from_midi(61).to_string(), "C#4");
    assert_eq!(Note::from_midi(40).to_string(), "E2");
    assert_eq!(Note::from_midi(0).to_string(), "C-1");
}

#[test]
fn enharmonic_notes_compare_by_pitch() {
    assert!(note("C#4").is_enharmonic(&note("Db4")));
    assert!(note("B#3").is_enharmonic(&note("C4")));
    assert!(!note("C4").is_enharmonic(&note("C5")));
    assert_ne!(note("C#4"), note("Db4"));
}

#[test]
fn note_serializes_as_string() {
    let json = serde_json::to_string(&note("G#3")).unwrap();
    assert_eq!(json, "\"G#3\"");
    let back: Note = serde_json::from_str(&json).unwrap();
    assert_eq!(back, note("G#3"));
    assert!(serde_json::from_str::<Note>("\"Q1\"").is_err());
}

// =============================================================
// Tuning
// =============================================================

#[test]
fn standard_tuning_open_strings() {
    let t = Tuning::standard();
    assert_eq!(t.num_strings(), 6);
    assert_eq!(t.open_note(0), Some(note("E4")));
    assert_eq!(t.open_note(5), Some(note("E2")));
    assert_eq!(t.open_note(6), None);
}

#[test]
fn note_at_adds_fret_to_open_string() {
    let t = Tuning::standard();
    assert_eq!(t.note_at(BoardCoordinate::new(5, 0)), Some(note("E2")));
    assert_eq!(t.note_at(BoardCoordinate::new(5, 1)), Some(note("F2")));
    assert_eq!(t.note_at(BoardCoordinate::new(4, 3)), Some(note("C3")));
    assert_eq!(t.note_at(BoardCoordinate::new(0, 12)), Some(note("E5")));
    assert_eq!(t.note_at(BoardCoordinate::new(9, 1)), None);
}

#[test]
fn positions_of_lists_every_matching_cell_in_range() {
    let t = Tuning::standard();
    // C4: B string fret 1, G string fret 5, D string fret 10.
    let all = t.positions_of(&note("C4"), 0, 12);
    assert_eq!(
        all,
        vec![BoardCoordinate::new(1, 1), BoardCoordinate::new(2, 5), BoardCoordinate::new(3, 10)]
    );
    let low = t.positions_of(&note("C4"), 1, 4);
    assert_eq!(low, vec![BoardCoordinate::new(1, 1)]);
}

#[test]
fn note_at_frets_beyond_i32_is_none() {
    let t = Tuning::standard();
    assert_eq!(t.note_at(BoardCoordinate::new(0, i32::MAX)), None);
    assert_eq!(t.note_at(BoardCoordinate::new(5, i32::MAX - 40)), Some(Note::from_midi(i32::MAX)));
}

#[test]
fn positions_of_extreme_notes_do_not_overflow() {
    let t = Tuning::new(vec![Note::new(Letter::C, Accidental::Natural, i32::MIN)]);
    assert!(t.positions_of(&note("G9"), 0, 24).is_empty());
}

#[test]
fn for_config_prefers_explicit_tuning() {
    let cfg = FretboardConfig {
        string_names: vec!["G".into(), "D".into(), "A".into(), "E".into()],
        tuning: Some(vec![note("G2"), note("D2"), note("A1"), note("E1")]),
        ..FretboardConfig::default()
    };
    let t = Tuning::for_config(&cfg).unwrap();
    assert_eq!(t.open_note(3), Some(note("E1")));
}

#[test]
fn for_config_falls_back_to_standard_for_default_names_only() {
    assert_eq!(Tuning::for_config(&FretboardConfig::default()), Some(Tuning::standard()));

    let drop_d = FretboardConfig {
        string_names: ["D", "A", "D", "G", "B", "E"].map(String::from).to_vec(),
        ..FretboardConfig::default()
    };
    assert_eq!(Tuning::for_config(&drop_d), None);

    let four = FretboardConfig {
        string_names: vec!["G".into(), "D".into(), "A".into(), "E".into()],
        ..FretboardConfig::default()
    };
    assert_eq!(Tuning::for_config(&four), None);
}
