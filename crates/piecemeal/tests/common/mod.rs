#![allow(dead_code)]

use std::sync::Arc;

use piecemeal::{
    ModelType,
    PieceType,
    TokenType,
    Vocabulary,
    load_model_bytes,
    vocab::{
        byte_piece_name,
        io::{ModelProto, NormalizerSpec, PieceProto, TrainerSpec},
    },
};

/// Chars covered by single-char pieces.
pub const CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,?'-";

pub fn model(
    model_type: ModelType,
    pieces: &[(&str, f32, PieceType)],
) -> ModelProto {
    let mut records = vec![
        PieceProto::new("<unk>", 0.0, PieceType::Unknown),
        PieceProto::new("<s>", 0.0, PieceType::Control),
        PieceProto::new("</s>", 0.0, PieceType::Control),
    ];
    records.extend(
        pieces
            .iter()
            .map(|&(piece, score, kind)| PieceProto::new(piece, score, kind)),
    );
    ModelProto {
        pieces: records,
        trainer_spec: TrainerSpec {
            model_type,
            ..Default::default()
        },
        normalizer_spec: NormalizerSpec {
            name: "identity".to_string(),
            ..Default::default()
        },
        denormalizer_spec: None,
    }
}

/// The "Hello you!" unigram model; optionally with byte fallback.
pub fn hello_model(byte_fallback: bool) -> ModelProto {
    let mut pieces: Vec<(String, f32, PieceType)> = [
        ("\u{2581}Hello", -1.0),
        ("\u{2581}How", -1.2),
        ("\u{2581}are", -0.9),
        ("\u{2581}you", -1.1),
        ("!", -0.3),
        ("\u{2581}", -2.0),
        ("\u{2581}He", -3.0),
        ("llo", -3.5),
    ]
    .into_iter()
    .map(|(piece, score)| (piece.to_string(), score, PieceType::Normal))
    .collect();
    pieces.extend(
        CHARS
            .chars()
            .map(|c| (c.to_string(), -8.0, PieceType::Normal)),
    );
    if byte_fallback {
        pieces.extend((0..=255u8).map(|b| (byte_piece_name(b), 0.0, PieceType::Byte)));
    }

    let pieces: Vec<(&str, f32, PieceType)> = pieces
        .iter()
        .map(|(piece, score, kind)| (piece.as_str(), *score, *kind))
        .collect();
    let mut model = model(ModelType::Unigram, &pieces);
    model.trainer_spec.byte_fallback = byte_fallback;
    model
}

/// Serialize and reload a model, as a file round trip would.
pub fn load<T: TokenType>(model: &ModelProto) -> Arc<Vocabulary<T>> {
    Arc::new(load_model_bytes(&model.to_bytes()).unwrap())
}
