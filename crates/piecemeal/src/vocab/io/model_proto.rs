//! # Model Proto Schema
//!
//! The runtime-relevant subset of the serialized model message.
//!
//! | message          | field | name                        | wire      |
//! |------------------|-------|-----------------------------|-----------|
//! | `ModelProto`     | 1     | pieces                      | message*  |
//! |                  | 2     | trainer_spec                | message   |
//! |                  | 3     | normalizer_spec             | message   |
//! |                  | 5     | denormalizer_spec           | message   |
//! | `SentencePiece`  | 1     | piece                       | string    |
//! |                  | 2     | score                       | float     |
//! |                  | 3     | type                        | enum      |
//! | `TrainerSpec`    | 3     | model_type                  | enum      |
//! |                  | 24    | treat_whitespace_as_suffix  | bool      |
//! |                  | 35    | byte_fallback               | bool      |
//! |                  | 40-43 | unk/bos/eos/pad id          | int32     |
//! |                  | 44    | unk_surface                 | string    |
//! |                  | 45-48 | unk/bos/eos/pad piece       | string    |
//! | `NormalizerSpec` | 1     | name                        | string    |
//! |                  | 2     | precompiled_charsmap        | bytes     |
//! |                  | 3     | add_dummy_prefix            | bool      |
//! |                  | 4     | remove_extra_whitespaces    | bool      |
//! |                  | 5     | escape_whitespaces          | bool      |
//! |                  | 6     | normalization_rule_tsv      | string    |
//!
//! All other fields are skipped by wire type.

use crate::{
    alloc::{
        string::{String, ToString},
        vec::Vec,
    },
    errors::PMResult,
    vocab::{
        ModelType,
        PieceType,
        io::wire::{WireReader, WireType, WireWriter},
    },
};

/// A serialized vocabulary piece.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceProto {
    /// Piece content.
    pub piece: String,

    /// Piece score.
    pub score: f32,

    /// Piece type.
    pub kind: PieceType,
}

impl PieceProto {
    /// Create a piece record.
    pub fn new<S: Into<String>>(
        piece: S,
        score: f32,
        kind: PieceType,
    ) -> Self {
        Self {
            piece: piece.into(),
            score,
            kind,
        }
    }

    fn parse(buf: &[u8]) -> PMResult<Self> {
        let mut reader = WireReader::new(buf);
        let mut piece = Self::new("", 0.0, PieceType::Normal);
        while !reader.is_empty() {
            let key = reader.read_key()?;
            match key.field {
                1 => {
                    key.expect(WireType::LengthDelimited, "SentencePiece.piece")?;
                    piece.piece = reader.read_str()?.to_string();
                }
                2 => {
                    key.expect(WireType::Fixed32, "SentencePiece.score")?;
                    piece.score = reader.read_float()?;
                }
                3 => {
                    key.expect(WireType::Varint, "SentencePiece.type")?;
                    piece.kind = PieceType::from_proto(reader.read_int32()?)?;
                }
                _ => reader.skip(key.wire_type)?,
            }
        }
        Ok(piece)
    }

    fn write(
        &self,
        writer: &mut WireWriter,
    ) {
        writer.write_bytes(1, self.piece.as_bytes());
        writer.write_float(2, self.score);
        if self.kind != PieceType::Normal {
            writer.write_int32(3, self.kind.to_proto());
        }
    }
}

/// Training-time parameters which also steer encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerSpec {
    /// Segmentation algorithm.
    pub model_type: ModelType,

    /// Attach the word boundary marker to the end of words, not the start.
    pub treat_whitespace_as_suffix: bool,

    /// Decompose unknown text into ``<0xXX>`` byte pieces.
    pub byte_fallback: bool,

    /// Declared id of the unknown piece.
    pub unk_id: i32,

    /// Declared id of the begin-of-sequence piece; ``-1`` if disabled.
    pub bos_id: i32,

    /// Declared id of the end-of-sequence piece; ``-1`` if disabled.
    pub eos_id: i32,

    /// Declared id of the padding piece; ``-1`` if disabled.
    pub pad_id: i32,

    /// Text emitted when decoding the unknown piece.
    pub unk_surface: String,

    /// Unknown piece text.
    pub unk_piece: String,

    /// Begin-of-sequence piece text.
    pub bos_piece: String,

    /// End-of-sequence piece text.
    pub eos_piece: String,

    /// Padding piece text.
    pub pad_piece: String,
}

impl Default for TrainerSpec {
    fn default() -> Self {
        Self {
            model_type: ModelType::Unigram,
            treat_whitespace_as_suffix: false,
            byte_fallback: false,
            unk_id: 0,
            bos_id: 1,
            eos_id: 2,
            pad_id: -1,
            unk_surface: " \u{2047} ".to_string(),
            unk_piece: "<unk>".to_string(),
            bos_piece: "<s>".to_string(),
            eos_piece: "</s>".to_string(),
            pad_piece: "<pad>".to_string(),
        }
    }
}

impl TrainerSpec {
    fn parse(buf: &[u8]) -> PMResult<Self> {
        let mut reader = WireReader::new(buf);
        let mut spec = Self::default();
        while !reader.is_empty() {
            let key = reader.read_key()?;
            match key.field {
                3 => {
                    key.expect(WireType::Varint, "TrainerSpec.model_type")?;
                    spec.model_type = ModelType::from_proto(reader.read_int32()?)?;
                }
                24 => {
                    key.expect(WireType::Varint, "TrainerSpec.treat_whitespace_as_suffix")?;
                    spec.treat_whitespace_as_suffix = reader.read_bool()?;
                }
                35 => {
                    key.expect(WireType::Varint, "TrainerSpec.byte_fallback")?;
                    spec.byte_fallback = reader.read_bool()?;
                }
                40..=43 => {
                    key.expect(WireType::Varint, "TrainerSpec special id")?;
                    let value = reader.read_int32()?;
                    match key.field {
                        40 => spec.unk_id = value,
                        41 => spec.bos_id = value,
                        42 => spec.eos_id = value,
                        _ => spec.pad_id = value,
                    }
                }
                44..=48 => {
                    key.expect(WireType::LengthDelimited, "TrainerSpec special piece")?;
                    let value = reader.read_str()?.to_string();
                    match key.field {
                        44 => spec.unk_surface = value,
                        45 => spec.unk_piece = value,
                        46 => spec.bos_piece = value,
                        47 => spec.eos_piece = value,
                        _ => spec.pad_piece = value,
                    }
                }
                _ => reader.skip(key.wire_type)?,
            }
        }
        Ok(spec)
    }

    fn write(
        &self,
        writer: &mut WireWriter,
    ) {
        writer.write_int32(3, self.model_type.to_proto());
        writer.write_bool(24, self.treat_whitespace_as_suffix);
        writer.write_bool(35, self.byte_fallback);
        writer.write_int32(40, self.unk_id);
        writer.write_int32(41, self.bos_id);
        writer.write_int32(42, self.eos_id);
        writer.write_int32(43, self.pad_id);
        writer.write_bytes(44, self.unk_surface.as_bytes());
        writer.write_bytes(45, self.unk_piece.as_bytes());
        writer.write_bytes(46, self.bos_piece.as_bytes());
        writer.write_bytes(47, self.eos_piece.as_bytes());
        writer.write_bytes(48, self.pad_piece.as_bytes());
    }
}

/// Text normalization parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerSpec {
    /// Rule name; ``nfkc``, ``nmt_nfkc``, ``identity``, ...
    pub name: String,

    /// Serialized double-array rule table.
    pub precompiled_charsmap: Vec<u8>,

    /// Prepend a virtual space to the input.
    pub add_dummy_prefix: bool,

    /// Drop leading and trailing spaces; collapse interior runs.
    pub remove_extra_whitespaces: bool,

    /// Replace spaces with the word boundary marker.
    pub escape_whitespaces: bool,

    /// Tab-separated hex code point rules: ``src<TAB>dst``.
    pub normalization_rule_tsv: String,
}

impl Default for NormalizerSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            precompiled_charsmap: Vec::new(),
            add_dummy_prefix: true,
            remove_extra_whitespaces: true,
            escape_whitespaces: true,
            normalization_rule_tsv: String::new(),
        }
    }
}

impl NormalizerSpec {
    /// A spec which changes nothing; used for denormalizers.
    pub fn identity() -> Self {
        Self {
            name: "identity".to_string(),
            add_dummy_prefix: false,
            remove_extra_whitespaces: false,
            escape_whitespaces: false,
            ..Self::default()
        }
    }

    fn parse(buf: &[u8]) -> PMResult<Self> {
        let mut reader = WireReader::new(buf);
        let mut spec = Self::default();
        while !reader.is_empty() {
            let key = reader.read_key()?;
            match key.field {
                1 => {
                    key.expect(WireType::LengthDelimited, "NormalizerSpec.name")?;
                    spec.name = reader.read_str()?.to_string();
                }
                2 => {
                    key.expect(WireType::LengthDelimited, "NormalizerSpec.precompiled_charsmap")?;
                    spec.precompiled_charsmap = reader.read_bytes()?.to_vec();
                }
                3..=5 => {
                    key.expect(WireType::Varint, "NormalizerSpec flag")?;
                    let value = reader.read_bool()?;
                    match key.field {
                        3 => spec.add_dummy_prefix = value,
                        4 => spec.remove_extra_whitespaces = value,
                        _ => spec.escape_whitespaces = value,
                    }
                }
                6 => {
                    key.expect(WireType::LengthDelimited, "NormalizerSpec.normalization_rule_tsv")?;
                    spec.normalization_rule_tsv = reader.read_str()?.to_string();
                }
                _ => reader.skip(key.wire_type)?,
            }
        }
        Ok(spec)
    }

    fn write(
        &self,
        writer: &mut WireWriter,
    ) {
        writer.write_bytes(1, self.name.as_bytes());
        if !self.precompiled_charsmap.is_empty() {
            writer.write_bytes(2, &self.precompiled_charsmap);
        }
        writer.write_bool(3, self.add_dummy_prefix);
        writer.write_bool(4, self.remove_extra_whitespaces);
        writer.write_bool(5, self.escape_whitespaces);
        if !self.normalization_rule_tsv.is_empty() {
            writer.write_bytes(6, self.normalization_rule_tsv.as_bytes());
        }
    }
}

/// A parsed model file.
///
/// This is the raw schema; [`Vocabulary::from_proto`](crate::vocab::Vocabulary::from_proto)
/// validates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelProto {
    /// Pieces, in id order.
    pub pieces: Vec<PieceProto>,

    /// Trainer parameters.
    pub trainer_spec: TrainerSpec,

    /// Normalizer parameters.
    pub normalizer_spec: NormalizerSpec,

    /// Optional decode-time rule set.
    pub denormalizer_spec: Option<NormalizerSpec>,
}

impl ModelProto {
    /// Parse serialized model bytes.
    ///
    /// ## Arguments
    /// * `buf` - The complete serialized message.
    ///
    /// ## Returns
    /// The schema, or [`PMError::MalformedModel`](crate::PMError::MalformedModel).
    pub fn parse(buf: &[u8]) -> PMResult<Self> {
        let mut reader = WireReader::new(buf);
        let mut model = Self::default();
        while !reader.is_empty() {
            let key = reader.read_key()?;
            match key.field {
                1 => {
                    key.expect(WireType::LengthDelimited, "ModelProto.pieces")?;
                    model.pieces.push(PieceProto::parse(reader.read_bytes()?)?);
                }
                2 => {
                    key.expect(WireType::LengthDelimited, "ModelProto.trainer_spec")?;
                    model.trainer_spec = TrainerSpec::parse(reader.read_bytes()?)?;
                }
                3 => {
                    key.expect(WireType::LengthDelimited, "ModelProto.normalizer_spec")?;
                    model.normalizer_spec = NormalizerSpec::parse(reader.read_bytes()?)?;
                }
                5 => {
                    key.expect(WireType::LengthDelimited, "ModelProto.denormalizer_spec")?;
                    model.denormalizer_spec = Some(NormalizerSpec::parse(reader.read_bytes()?)?);
                }
                _ => reader.skip(key.wire_type)?,
            }
        }
        Ok(model)
    }

    /// Serialize the model.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        for piece in &self.pieces {
            writer.write_message(1, |w| piece.write(w));
        }
        writer.write_message(2, |w| self.trainer_spec.write(w));
        writer.write_message(3, |w| self.normalizer_spec.write(w));
        if let Some(spec) = &self.denormalizer_spec {
            writer.write_message(5, |w| spec.write(w));
        }
        writer.into_bytes()
    }
}
