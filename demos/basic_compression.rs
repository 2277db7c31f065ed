use huffman_coding::HuffmanCodec;
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = tempfile::tempdir()?;
    let sample_path = dir.path().join("sample.txt");
    let archive_path = dir.path().join("sample.huff");
    let output_path = dir.path().join("decompressed.txt");

    std::fs::write(&sample_path, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let codec = HuffmanCodec::from_file(&sample_path)?;
    if let Some(tree) = codec.tree() {
        println!(
            "Tree has {} leaves, longest code {} bits",
            tree.leaf_count(),
            codec.encoding_table().max_code_length()
        );
    }

    HuffmanCodec::encode_from_file(File::open(&sample_path)?, File::create(&archive_path)?)?;

    let compressed_size = std::fs::metadata(&archive_path)?.len();
    let compression_ratio = compressed_size as f64 / sample_text.len() as f64;
    println!(
        "Compressed to: {} bytes ({:.1}% of original, frequency table included)",
        compressed_size,
        compression_ratio * 100.0
    );

    HuffmanCodec::decode_from_file(File::open(&archive_path)?, File::create(&output_path)?)?;

    let decompressed_text = std::fs::read_to_string(&output_path)?;
    if sample_text != decompressed_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly");

    Ok(())
}
