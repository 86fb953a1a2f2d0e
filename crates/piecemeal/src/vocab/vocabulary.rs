//! # Vocabulary

use crate::{
    alloc::{
        format,
        string::{String, ToString},
        vec::Vec,
    },
    errors::{PMError, PMResult},
    normalizers::{NormalizationRules, Normalizer},
    types::{PMHashMap, TokenType, hash_map_with_capacity},
    vocab::{
        BytePieceMap,
        ModelType,
        Piece,
        PieceTrie,
        PieceType,
        UserSymbolMatcher,
        io::{ModelProto, NormalizerSpec},
        parse_byte_piece,
    },
};

/// An immutable, validated model vocabulary.
///
/// Holds the pieces, their prefix index, and the normalizer built from the
/// model's spec. Construction validates everything; afterwards the value is
/// read-only and is shared between encoders and decoders via `Arc`.
///
/// Invariants:
/// * piece ids are dense, ``0..len()``;
/// * piece strings are non-empty and unique;
/// * there is exactly one [`PieceType::Unknown`] piece, unless byte fallback
///   is enabled (then zero or one);
/// * with byte fallback, all 256 ``<0xXX>`` byte pieces exist.
///
/// ## Style Hints
/// Instance names should prefer `vocab`.
#[derive(Debug, Clone)]
pub struct Vocabulary<T: TokenType> {
    pieces: Vec<Piece<T>>,
    piece_ids: PMHashMap<String, T>,
    index: PieceTrie<T>,

    model_type: ModelType,
    unk_id: Option<T>,
    bos_id: Option<T>,
    eos_id: Option<T>,
    pad_id: Option<T>,
    unk_surface: String,

    byte_pieces: Option<BytePieceMap<T>>,
    user_symbols: UserSymbolMatcher,

    normalizer: Normalizer,
    denormalizer: Option<NormalizationRules>,

    min_score: f32,
    max_score: f32,
}

impl<T: TokenType> Vocabulary<T> {
    /// Validate a parsed model, and build the vocabulary.
    ///
    /// ## Arguments
    /// * `proto` - The parsed model.
    ///
    /// ## Returns
    /// The vocabulary, or [`PMError::MalformedModel`] on any inconsistency.
    pub fn from_proto(proto: &ModelProto) -> PMResult<Self> {
        let trainer = &proto.trainer_spec;
        let byte_fallback = trainer.byte_fallback;

        if proto.pieces.is_empty() {
            return Err(PMError::malformed("model has no pieces"));
        }
        if T::from_usize(proto.pieces.len()).is_none() {
            return Err(PMError::malformed(format!(
                "piece count {} overflows the token type",
                proto.pieces.len()
            )));
        }

        let mut pieces = Vec::with_capacity(proto.pieces.len());
        let mut piece_ids: PMHashMap<String, T> = hash_map_with_capacity(proto.pieces.len());
        let mut unk_id = None;
        let mut byte_pairs = Vec::new();
        let mut user_symbols = Vec::new();
        let mut min_score = f32::INFINITY;
        let mut max_score = f32::NEG_INFINITY;

        for (idx, record) in proto.pieces.iter().enumerate() {
            let id = T::from_usize(idx)
                .ok_or_else(|| PMError::malformed(format!("piece id {idx} overflows")))?;

            if record.piece.is_empty() {
                return Err(PMError::malformed(format!("piece {idx} is empty")));
            }
            if piece_ids.insert(record.piece.clone(), id).is_some() {
                return Err(PMError::malformed(format!(
                    "piece {:?} is duplicated (id {idx})",
                    record.piece
                )));
            }
            if !record.score.is_finite() {
                log::warn!("piece {:?} has non-finite score {}", record.piece, record.score);
            }

            match record.kind {
                PieceType::Normal => {
                    min_score = min_score.min(record.score);
                    max_score = max_score.max(record.score);
                }
                PieceType::Unknown => {
                    if unk_id.replace(id).is_some() {
                        return Err(PMError::malformed("model has multiple unknown pieces"));
                    }
                }
                PieceType::Byte => {
                    if !byte_fallback {
                        return Err(PMError::malformed(format!(
                            "byte piece {:?} found, but byte fallback is disabled",
                            record.piece
                        )));
                    }
                    let byte = parse_byte_piece(&record.piece).ok_or_else(|| {
                        PMError::malformed(format!("malformed byte piece {:?}", record.piece))
                    })?;
                    byte_pairs.push((byte, id));
                }
                PieceType::UserDefined => user_symbols.push(record.piece.as_str()),
                PieceType::Control | PieceType::Unused => (),
            }

            pieces.push(Piece::new(id, record.piece.as_str(), record.score, record.kind));
        }

        if unk_id.is_none() && !byte_fallback {
            return Err(PMError::malformed("model has no unknown piece"));
        }
        if let Some(unk) = unk_id
            && trainer.unk_id >= 0
            && unk.to_i64() != Some(trainer.unk_id as i64)
        {
            log::warn!(
                "unknown piece has id {unk}, but the trainer spec declares {}",
                trainer.unk_id
            );
        }
        if min_score > max_score {
            min_score = 0.0;
            max_score = 0.0;
        }

        let byte_pieces = if byte_fallback {
            Some(BytePieceMap::from_pairs(byte_pairs)?)
        } else {
            None
        };

        let index = PieceTrie::from_pieces(
            pieces
                .iter()
                .filter(|p| p.is_normal() || p.is_user_defined() || p.is_unused())
                .map(|p| (p.text(), p.id())),
        );

        let user_symbols = UserSymbolMatcher::new(user_symbols)?;
        let normalizer = Normalizer::from_spec(
            &proto.normalizer_spec,
            user_symbols.clone(),
            trainer.treat_whitespace_as_suffix,
        )?;
        let denormalizer = match &proto.denormalizer_spec {
            Some(spec) if has_rule_table(spec) => Some(NormalizationRules::from_spec(spec)?),
            _ => None,
        };

        let control_id = |piece: &str| {
            piece_ids.get(piece).copied().filter(|&id| {
                id.to_usize()
                    .and_then(|idx| pieces.get(idx))
                    .is_some_and(|p| p.is_control())
            })
        };
        let bos_id = control_id(&trainer.bos_piece);
        let eos_id = control_id(&trainer.eos_piece);
        let pad_id = control_id(&trainer.pad_piece);

        log::debug!(
            "loaded {:?} model: {} pieces ({} indexed), byte_fallback={}, unk={:?}",
            trainer.model_type,
            pieces.len(),
            index.len(),
            byte_fallback,
            unk_id
        );

        Ok(Self {
            pieces,
            piece_ids,
            index,
            model_type: trainer.model_type,
            unk_id,
            bos_id,
            eos_id,
            pad_id,
            unk_surface: trainer.unk_surface.to_string(),
            byte_pieces,
            user_symbols,
            normalizer,
            denormalizer,
            min_score,
            max_score,
        })
    }

    /// The number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Is the vocabulary empty? (Never, for a loaded model.)
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All pieces, in id order.
    pub fn pieces(&self) -> &[Piece<T>] {
        &self.pieces
    }

    /// Look up a piece by id.
    #[inline(always)]
    pub fn piece(
        &self,
        id: T,
    ) -> Option<&Piece<T>> {
        self.pieces.get(id.to_usize()?)
    }

    /// The text of piece `id`.
    pub fn id_to_piece(
        &self,
        id: T,
    ) -> Option<&str> {
        self.piece(id).map(Piece::text)
    }

    /// The id of the piece with text `piece`.
    ///
    /// Any piece type matches; see [`index`](Self::index) for text lookups.
    pub fn piece_to_id(
        &self,
        piece: &str,
    ) -> Option<T> {
        self.piece_ids.get(piece).copied()
    }

    /// The type of piece `id`.
    pub fn piece_type(
        &self,
        id: T,
    ) -> Option<PieceType> {
        self.piece(id).map(Piece::kind)
    }

    /// Is `id` the unknown piece?
    pub fn is_unknown(
        &self,
        id: T,
    ) -> bool {
        self.piece_type(id) == Some(PieceType::Unknown)
    }

    /// Is `id` a control piece?
    pub fn is_control(
        &self,
        id: T,
    ) -> bool {
        self.piece_type(id) == Some(PieceType::Control)
    }

    /// Is `id` a user-defined piece?
    pub fn is_user_defined(
        &self,
        id: T,
    ) -> bool {
        self.piece_type(id) == Some(PieceType::UserDefined)
    }

    /// Is `id` an unused piece?
    pub fn is_unused(
        &self,
        id: T,
    ) -> bool {
        self.piece_type(id) == Some(PieceType::Unused)
    }

    /// Is `id` a byte piece?
    pub fn is_byte(
        &self,
        id: T,
    ) -> bool {
        self.piece_type(id) == Some(PieceType::Byte)
    }

    /// The segmentation algorithm family.
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// The unknown piece id; `None` only under byte fallback.
    pub fn unk_id(&self) -> Option<T> {
        self.unk_id
    }

    /// The begin-of-sequence control id, if the model has one.
    pub fn bos_id(&self) -> Option<T> {
        self.bos_id
    }

    /// The end-of-sequence control id, if the model has one.
    pub fn eos_id(&self) -> Option<T> {
        self.eos_id
    }

    /// The padding control id, if the model has one.
    pub fn pad_id(&self) -> Option<T> {
        self.pad_id
    }

    /// The text emitted when decoding the unknown piece.
    pub fn unk_surface(&self) -> &str {
        &self.unk_surface
    }

    /// Is byte fallback enabled?
    pub fn byte_fallback(&self) -> bool {
        self.byte_pieces.is_some()
    }

    /// The byte-fallback piece table.
    pub fn byte_pieces(&self) -> Option<&BytePieceMap<T>> {
        self.byte_pieces.as_ref()
    }

    /// The prefix index over normal, user-defined and unused pieces.
    pub fn index(&self) -> &PieceTrie<T> {
        &self.index
    }

    /// The user-defined symbol matcher.
    pub fn user_symbols(&self) -> &UserSymbolMatcher {
        &self.user_symbols
    }

    /// The input normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The decode-time rule set, if the model has one.
    pub fn denormalizer(&self) -> Option<&NormalizationRules> {
        self.denormalizer.as_ref()
    }

    /// The lowest score of any normal piece.
    pub fn min_score(&self) -> f32 {
        self.min_score
    }

    /// The highest score of any normal piece.
    pub fn max_score(&self) -> f32 {
        self.max_score
    }
}

fn has_rule_table(spec: &NormalizerSpec) -> bool {
    !spec.precompiled_charsmap.is_empty() || !spec.normalization_rule_tsv.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alloc::vec,
        errors::ErrorKind,
        vocab::{
            byte_piece_name,
            io::PieceProto,
            utility::testing::{byte_fallback_model, hello_model},
        },
    };

    #[test]
    fn test_hello_model() {
        type T = u32;
        let vocab: Vocabulary<T> = Vocabulary::from_proto(&hello_model()).unwrap();

        assert_eq!(vocab.model_type(), ModelType::Unigram);
        assert_eq!(vocab.unk_id(), Some(0));
        assert_eq!(vocab.bos_id(), Some(1));
        assert_eq!(vocab.eos_id(), Some(2));
        assert_eq!(vocab.pad_id(), None);
        assert!(!vocab.byte_fallback());

        let hello = vocab.piece_to_id("\u{2581}Hello").unwrap();
        assert_eq!(vocab.id_to_piece(hello), Some("\u{2581}Hello"));
        assert_eq!(vocab.piece(hello).unwrap().score(), -1.0);
        assert!(vocab.is_control(1));
        assert!(vocab.is_unknown(0));
        assert_eq!(vocab.piece_type(9999), None);
        assert_eq!(vocab.id_to_piece(9999), None);

        // Control and unknown pieces are not text-indexed.
        assert_eq!(vocab.index().get("<s>"), None);
        assert_eq!(vocab.index().get("\u{2581}Hello"), Some(hello));

        assert!(vocab.min_score() < vocab.max_score());
    }

    #[test]
    fn test_byte_fallback_model() {
        type T = u16;
        let vocab: Vocabulary<T> = Vocabulary::from_proto(&byte_fallback_model()).unwrap();
        assert!(vocab.byte_fallback());

        let bytes = vocab.byte_pieces().unwrap();
        let id = bytes.get_token(0xe0);
        assert_eq!(vocab.id_to_piece(id), Some("<0xE0>"));
        assert!(vocab.is_byte(id));
        assert_eq!(bytes.get_byte(id), Some(0xe0));
    }

    #[test]
    fn test_duplicate_piece() {
        let mut model = hello_model();
        model
            .pieces
            .push(PieceProto::new("\u{2581}Hello", -3.0, PieceType::Normal));
        let err = Vocabulary::<u32>::from_proto(&model).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedModel);
    }

    #[test]
    fn test_empty_piece() {
        let mut model = hello_model();
        model.pieces.push(PieceProto::new("", -3.0, PieceType::Normal));
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());
    }

    #[test]
    fn test_unknown_piece_rules() {
        let mut model = hello_model();
        model.pieces.push(PieceProto::new("<unk2>", 0.0, PieceType::Unknown));
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());

        let mut model = hello_model();
        model.pieces.remove(0);
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());

        // Byte fallback makes the unknown piece optional.
        let mut model = byte_fallback_model();
        model.pieces.remove(0);
        let vocab = Vocabulary::<u32>::from_proto(&model).unwrap();
        assert_eq!(vocab.unk_id(), None);
    }

    #[test]
    fn test_byte_piece_rules() {
        let mut model = hello_model();
        model.pieces.push(PieceProto::new("<0x41>", 0.0, PieceType::Byte));
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());

        let mut model = byte_fallback_model();
        let idx = model
            .pieces
            .iter()
            .position(|p| p.piece == byte_piece_name(0x41))
            .unwrap();
        model.pieces.remove(idx);
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());

        let mut model = byte_fallback_model();
        model.pieces.push(PieceProto::new("<0xZZ>", 0.0, PieceType::Byte));
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());
    }

    #[test]
    fn test_token_type_overflow() {
        let mut model = byte_fallback_model();
        for idx in 0..256 {
            model
                .pieces
                .push(PieceProto::new(format!("x{idx}"), -20.0, PieceType::Normal));
        }
        assert!(model.pieces.len() > 256);
        let err = Vocabulary::<u8>::from_proto(&model).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedModel);
        assert!(Vocabulary::<u16>::from_proto(&model).is_ok());
    }

    #[test]
    fn test_no_pieces() {
        let model = ModelProto {
            pieces: vec![],
            ..hello_model()
        };
        assert!(Vocabulary::<u32>::from_proto(&model).is_err());
    }
}
