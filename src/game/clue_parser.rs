use std::collections::HashMap;

use log::trace;

use crate::error::PuzzleError;
use crate::model::{
    Clue, CountConstraint, FeatureKind, Gender, Person, PersonId, PositionSelector, Role, Room,
    RoomId, SubjectSelector,
};

const NOUNS: [&str; 8] = [
    "man", "men", "woman", "women", "person", "people", "suspect", "suspects",
];

const NUMBER_NAMES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// "a"/"an"/"another" count as one; number names map to their value;
/// digit strings parse literally.
fn number_value(word: &str) -> Option<usize> {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return word.parse().ok();
    }
    if matches!(word, "a" | "an" | "another") {
        return Some(1);
    }
    NUMBER_NAMES.iter().position(|name| *name == word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preposition {
    On,
    Beside,
    In,
    InSameRowAs,
    InSameColumnAs,
    InSameRoomAs,
    InCornerOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Object {
    Feature(FeatureKind),
    Room(RoomId),
    // the bare word "room", as in "in the corner of the room"
    AnyRoom,
}

struct Quantifier {
    number: Option<usize>,
    selector: SubjectSelector,
}

/// Word cursor over one normalized clue sentence. Entity names are
/// matched longest-first so a room called "living room" wins over the
/// generic word "room".
struct Cursor<'a> {
    words: &'a [String],
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(words: &'a [String]) -> Self {
        Self { words, index: 0 }
    }

    fn done(&self) -> bool {
        self.index >= self.words.len()
    }

    fn next_word(&mut self) -> Option<String> {
        let word = self.words.get(self.index).cloned();
        if word.is_some() {
            self.index += 1;
        }
        word
    }

    fn accept(&mut self, word: &str) -> bool {
        if self.words.get(self.index).map(String::as_str) == Some(word) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// All-or-nothing match of a word sequence.
    fn accept_seq(&mut self, sequence: &[&str]) -> bool {
        let end = self.index + sequence.len();
        if end > self.words.len() {
            return false;
        }
        if self.words[self.index..end]
            .iter()
            .zip(sequence)
            .all(|(word, expected)| word == expected)
        {
            self.index = end;
            true
        } else {
            false
        }
    }

    fn take_entity<V: Copy>(&mut self, entities: &HashMap<String, V>, max_words: usize) -> Option<V> {
        let available = self.words.len() - self.index;
        for length in (1..=max_words.min(available)).rev() {
            let key = self.words[self.index..self.index + length].join(" ");
            if let Some(value) = entities.get(&key) {
                self.index += length;
                return Some(*value);
            }
        }
        None
    }

    fn take_feature(&mut self) -> Option<FeatureKind> {
        let word = self.words.get(self.index)?;
        let kind = FeatureKind::from_name(word)?;
        self.index += 1;
        Some(kind)
    }
}

/// Compiles raw clue text against the vocabulary of the current puzzle
/// (people, rooms, the static feature table, number words). Grammar and
/// vocabulary misses both fail as `ClueSyntax`, before any solving.
pub struct ClueParser {
    people: HashMap<String, PersonId>,
    people_max_words: usize,
    rooms: HashMap<String, RoomId>,
    rooms_max_words: usize,
    room_ids: Vec<RoomId>,
}

impl ClueParser {
    pub fn new(people: &[Person], rooms: &[Room]) -> Self {
        let people_map: HashMap<String, PersonId> = people
            .iter()
            .map(|person| (person.name.to_lowercase(), person.id))
            .collect();
        let rooms_map: HashMap<String, RoomId> = rooms
            .iter()
            .map(|room| (room.name.to_lowercase(), room.id))
            .collect();
        let people_max_words = longest_key(&people_map);
        let rooms_max_words = longest_key(&rooms_map);
        let mut room_ids: Vec<RoomId> = rooms.iter().map(|room| room.id).collect();
        room_ids.sort_unstable();
        Self {
            people: people_map,
            people_max_words,
            rooms: rooms_map,
            rooms_max_words,
            room_ids,
        }
    }

    /// Parses one clue sentence. Most sentences yield a single clue;
    /// the exclusivity form yields two and the empty-room form yields
    /// one per room.
    pub fn parse(&self, raw: &str) -> Result<Vec<Clue>, PuzzleError> {
        let words: Vec<String> = normalize(raw);
        let clues = self.parse_words(&words, raw)?;
        trace!(target: "parser", "{:?} -> {} clue(s)", raw, clues.len());
        Ok(clues)
    }

    /// Parses every clue of the puzzle, failing fast on the first
    /// sentence the grammar rejects.
    pub fn parse_all(&self, raw_clues: &[String]) -> Result<Vec<Clue>, PuzzleError> {
        let mut clues = Vec::new();
        for raw in raw_clues {
            clues.extend(self.parse(raw)?);
        }
        Ok(clues)
    }

    fn parse_words(&self, words: &[String], raw: &str) -> Result<Vec<Clue>, PuzzleError> {
        let syntax = || PuzzleError::syntax(raw);

        if words
            .iter()
            .map(String::as_str)
            .eq(["there", "was", "no", "empty", "room"])
        {
            return Ok(self
                .room_ids
                .iter()
                .map(|room_id| Clue::room_occupied(*room_id))
                .collect());
        }

        let mut cursor = Cursor::new(words);
        let person_id = cursor
            .take_entity(&self.people, self.people_max_words)
            .ok_or_else(syntax)?;

        let _ = cursor.accept("is") || cursor.accept("was");

        let exclusive = if cursor.accept_seq(&["the", "only", "person"]) {
            cursor.accept_seq(&["in", "the", "house"]);
            true
        } else {
            cursor.accept("alone")
        };

        cursor.accept_seq(&["that", "was"]);
        let _ = cursor.accept("standing") || cursor.accept("sitting");

        let preposition = self.parse_preposition(&mut cursor).ok_or_else(syntax)?;
        let _ = cursor.accept("a") || cursor.accept("the");
        let object = self.parse_object(&mut cursor).ok_or_else(syntax)?;
        let quantifier = self.parse_quantifier(&mut cursor, raw)?;
        if !cursor.done() {
            return Err(syntax());
        }

        let position = position_selector(preposition, object).ok_or_else(syntax)?;

        if exclusive {
            // "the only person" decomposes into the subject pinned there
            // and everyone else shut out of there
            return Ok(vec![
                Clue::single(person_id, position),
                Clue::new(
                    vec![SubjectSelector::everyone_except(person_id)],
                    position,
                    CountConstraint::Exactly(0),
                ),
            ]);
        }

        match quantifier {
            None => Ok(vec![Clue::single(person_id, position)]),
            Some(quantifier) => {
                let count = match quantifier.number {
                    Some(number) => CountConstraint::Exactly(1 + number),
                    None => CountConstraint::AtLeast(1),
                };
                Ok(vec![Clue::new(
                    vec![SubjectSelector::person(person_id), quantifier.selector],
                    position,
                    count,
                )])
            }
        }
    }

    fn parse_preposition(&self, cursor: &mut Cursor) -> Option<Preposition> {
        if cursor.accept("on") {
            Some(Preposition::On)
        } else if cursor.accept("beside") || cursor.accept_seq(&["next", "to"]) {
            Some(Preposition::Beside)
        } else if cursor.accept("in") {
            if cursor.accept_seq(&["the", "same", "row", "as"]) {
                Some(Preposition::InSameRowAs)
            } else if cursor.accept_seq(&["the", "same", "column", "as"]) {
                Some(Preposition::InSameColumnAs)
            } else if cursor.accept_seq(&["the", "same", "room", "as"]) {
                Some(Preposition::InSameRoomAs)
            } else if cursor.accept_seq(&["the", "corner", "of"]) {
                Some(Preposition::InCornerOf)
            } else {
                Some(Preposition::In)
            }
        } else {
            None
        }
    }

    fn parse_object(&self, cursor: &mut Cursor) -> Option<Object> {
        if let Some(kind) = cursor.take_feature() {
            return Some(Object::Feature(kind));
        }
        if let Some(room_id) = cursor.take_entity(&self.rooms, self.rooms_max_words) {
            return Some(Object::Room(room_id));
        }
        if cursor.accept("room") {
            return Some(Object::AnyRoom);
        }
        None
    }

    fn parse_quantifier(
        &self,
        cursor: &mut Cursor,
        raw: &str,
    ) -> Result<Option<Quantifier>, PuzzleError> {
        if !cursor.accept("with") {
            return Ok(None);
        }
        let word = cursor.next_word().ok_or_else(|| PuzzleError::syntax(raw))?;
        let number = number_value(&word);
        if number.is_none() {
            return Err(PuzzleError::syntax(raw));
        }
        cursor.accept("other");

        let first = cursor.next_word().ok_or_else(|| PuzzleError::syntax(raw))?;
        let (adjective, noun) = if first == "suspect" {
            match cursor.next_word() {
                Some(second) => (Some("suspect"), second),
                None => (None, first),
            }
        } else {
            (None, first)
        };
        if !NOUNS.contains(&noun.as_str()) {
            return Err(PuzzleError::syntax(raw));
        }

        let mut role = adjective.and_then(Role::from_noun);
        let singular = noun.strip_suffix('s').unwrap_or(&noun);
        role = Role::from_noun(singular).or(role);
        let gender = Gender::from_noun(singular);

        Ok(Some(Quantifier {
            number,
            selector: SubjectSelector::matching(role, gender),
        }))
    }
}

fn position_selector(preposition: Preposition, object: Object) -> Option<PositionSelector> {
    match (preposition, object) {
        (Preposition::On, Object::Feature(kind)) => Some(PositionSelector::On(kind)),
        (Preposition::Beside, Object::Feature(kind)) => Some(PositionSelector::Beside(kind)),
        (Preposition::In, Object::Room(room_id)) => Some(PositionSelector::InRoom(room_id)),
        (Preposition::InSameRowAs, Object::Feature(kind)) => {
            Some(PositionSelector::InSameRowAs(kind))
        }
        (Preposition::InSameColumnAs, Object::Feature(kind)) => {
            Some(PositionSelector::InSameColumnAs(kind))
        }
        (Preposition::InSameRoomAs, Object::Feature(kind)) => {
            Some(PositionSelector::InSameRoomAs(kind))
        }
        // "in the corner of ..." names a room but the corner itself is
        // the predicate; the room is parsed and discarded
        (Preposition::InCornerOf, _) => Some(PositionSelector::Beside(FeatureKind::Corner)),
        _ => None,
    }
}

fn longest_key<V>(entities: &HashMap<String, V>) -> usize {
    entities
        .keys()
        .map(|key| key.split_whitespace().count())
        .max()
        .unwrap_or(1)
}

fn normalize(raw: &str) -> Vec<String> {
    let text = raw.trim();
    let text = text.strip_suffix('.').unwrap_or(text);
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ClueParser {
        let people = vec![
            Person::suspect(1, "Alice", Gender::Female),
            Person::suspect(2, "Bob", Gender::Male),
            Person::victim(3, "Carol", Gender::Female),
        ];
        let rooms = vec![
            Room::new(1, "Kitchen"),
            Room::new(2, "Parlor"),
            Room::new(3, "Study"),
        ];
        ClueParser::new(&people, &rooms)
    }

    #[test]
    fn test_person_in_room_round_trip() {
        let clues = parser().parse("Alice was in the Kitchen.").unwrap();
        assert_eq!(clues.len(), 1);
        assert_eq!(clues[0].subjects, vec![SubjectSelector::person(1)]);
        assert_eq!(clues[0].position, PositionSelector::InRoom(1));
        assert_eq!(clues[0].count, CountConstraint::Exactly(1));
    }

    #[test]
    fn test_case_insensitive_and_period_optional() {
        let clues = parser().parse("ALICE WAS IN THE KITCHEN").unwrap();
        assert_eq!(clues.len(), 1);
        assert_eq!(clues[0].position, PositionSelector::InRoom(1));
    }

    #[test]
    fn test_no_empty_room_expansion() {
        let clues = parser().parse("There was no empty room.").unwrap();
        assert_eq!(clues.len(), 3);
        for (index, clue) in clues.iter().enumerate() {
            assert_eq!(clue.subjects, vec![SubjectSelector::anyone()]);
            assert_eq!(clue.position, PositionSelector::InRoom(index as u32 + 1));
            assert_eq!(clue.count, CountConstraint::AtLeast(1));
        }
    }

    #[test]
    fn test_exclusivity_expansion() {
        let clues = parser().parse("Bob was the only person in the Kitchen.").unwrap();
        assert_eq!(clues.len(), 2);
        assert_eq!(clues[0].subjects, vec![SubjectSelector::person(2)]);
        assert_eq!(clues[0].count, CountConstraint::Exactly(1));
        assert_eq!(clues[1].subjects, vec![SubjectSelector::everyone_except(2)]);
        assert_eq!(clues[1].count, CountConstraint::Exactly(0));
        assert_eq!(clues[0].position, PositionSelector::InRoom(1));
        assert_eq!(clues[1].position, PositionSelector::InRoom(1));
    }

    #[test]
    fn test_alone_is_exclusive() {
        let clues = parser().parse("Bob was alone in the Parlor.").unwrap();
        assert_eq!(clues.len(), 2);
        assert_eq!(clues[1].count, CountConstraint::Exactly(0));
    }

    #[test]
    fn test_only_person_in_the_house() {
        let clues = parser()
            .parse("Alice was the only person in the house in the Study.")
            .unwrap();
        assert_eq!(clues.len(), 2);
        assert_eq!(clues[0].position, PositionSelector::InRoom(3));
    }

    #[test]
    fn test_on_feature() {
        let clues = parser().parse("Alice was sitting on a chair.").unwrap();
        assert_eq!(clues.len(), 1);
        assert_eq!(clues[0].position, PositionSelector::On(FeatureKind::Chair));
    }

    #[test]
    fn test_beside_and_next_to() {
        let beside = parser().parse("Bob was standing beside the window.").unwrap();
        assert_eq!(beside[0].position, PositionSelector::Beside(FeatureKind::Window));

        let next_to = parser().parse("Bob was next to the plant.").unwrap();
        assert_eq!(next_to[0].position, PositionSelector::Beside(FeatureKind::Plant));
    }

    #[test]
    fn test_corner_of_room() {
        let clues = parser().parse("Carol was in the corner of the room.").unwrap();
        assert_eq!(clues[0].position, PositionSelector::Beside(FeatureKind::Corner));

        // a named room parses too, and is equally discarded
        let clues = parser().parse("Carol was in the corner of the Study.").unwrap();
        assert_eq!(clues[0].position, PositionSelector::Beside(FeatureKind::Corner));
    }

    #[test]
    fn test_equivalence_prepositions() {
        let row = parser().parse("Alice was in the same row as the tv.").unwrap();
        assert_eq!(row[0].position, PositionSelector::InSameRowAs(FeatureKind::Tv));

        let column = parser()
            .parse("Alice was in the same column as the window.")
            .unwrap();
        assert_eq!(
            column[0].position,
            PositionSelector::InSameColumnAs(FeatureKind::Window)
        );

        let room = parser().parse("Carol was in the same room as the bed.").unwrap();
        assert_eq!(room[0].position, PositionSelector::InSameRoomAs(FeatureKind::Bed));
    }

    #[test]
    fn test_quantifier_with_number_word() {
        let clues = parser()
            .parse("Alice was in the Kitchen with two other people.")
            .unwrap();
        assert_eq!(clues.len(), 1);
        assert_eq!(clues[0].count, CountConstraint::Exactly(3));
        assert_eq!(clues[0].subjects.len(), 2);
        assert_eq!(clues[0].subjects[0], SubjectSelector::person(1));
        assert_eq!(clues[0].subjects[1], SubjectSelector::anyone());
    }

    #[test]
    fn test_quantifier_with_article() {
        let clues = parser().parse("Carol was in the Study with a man.").unwrap();
        assert_eq!(clues[0].count, CountConstraint::Exactly(2));
        assert_eq!(
            clues[0].subjects[1],
            SubjectSelector::matching(None, Some(Gender::Male))
        );
    }

    #[test]
    fn test_quantifier_with_digit() {
        let clues = parser()
            .parse("Bob was in the Parlor with 2 other suspects.")
            .unwrap();
        assert_eq!(clues[0].count, CountConstraint::Exactly(3));
        assert_eq!(
            clues[0].subjects[1],
            SubjectSelector::matching(Some(Role::Suspect), None)
        );
    }

    #[test]
    fn test_quantifier_suspect_adjective() {
        let clues = parser()
            .parse("Alice was in the Kitchen with another suspect woman.")
            .unwrap();
        assert_eq!(clues[0].count, CountConstraint::Exactly(2));
        assert_eq!(
            clues[0].subjects[1],
            SubjectSelector::matching(Some(Role::Suspect), Some(Gender::Female))
        );
    }

    #[test]
    fn test_quantifier_women_plural() {
        let clues = parser()
            .parse("Bob was in the Kitchen with two women.")
            .unwrap();
        assert_eq!(
            clues[0].subjects[1],
            SubjectSelector::matching(None, Some(Gender::Female))
        );
    }

    #[test]
    fn test_unknown_person_rejected() {
        let result = parser().parse("Dave was in the Kitchen.");
        assert_eq!(
            result,
            Err(PuzzleError::syntax("Dave was in the Kitchen."))
        );
    }

    #[test]
    fn test_unknown_preposition_rejected() {
        assert!(parser().parse("Alice was near the window.").is_err());
    }

    #[test]
    fn test_room_after_on_rejected() {
        assert!(parser().parse("Alice was on the Kitchen.").is_err());
    }

    #[test]
    fn test_bad_quantifier_word_rejected() {
        assert!(parser()
            .parse("Alice was in the Kitchen with several people.")
            .is_err());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parser().parse("Alice was in the Kitchen today.").is_err());
    }

    #[test]
    fn test_number_values() {
        assert_eq!(number_value("zero"), Some(0));
        assert_eq!(number_value("nine"), Some(9));
        assert_eq!(number_value("another"), Some(1));
        assert_eq!(number_value("an"), Some(1));
        assert_eq!(number_value("7"), Some(7));
        assert_eq!(number_value("several"), None);
    }
}
