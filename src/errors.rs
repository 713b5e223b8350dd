error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        MissingIndex(chrom: String, path: String) {
            description("no population SNP index for chromosome")
            display("no population SNP index for {:?} (expected {:?})", chrom, path)
        }

        GuideNotFound(chrom: String, guide: String, start: u64, end: u64) {
            description("guide not found in search region")
            display("guide {} not found on either strand of {}:{}-{}", guide, chrom, start, end)
        }

        EditOutOfBounds(coord: u64, cut: u64, arm_length: u64) {
            description("edit coordinate outside homology arms")
            display("edit coordinate {} must be within +/-{}bp of cut site at {}", coord, arm_length, cut)
        }

        UnsupportedEditType(name: String) {
            description("unsupported edit type")
            display("unsupported edit type {:?}; expected substitution, insertion or deletion", name)
        }

        InvalidEdit(msg: String) {
            description("invalid edit")
            display("invalid edit: {}", msg)
        }

        InvalidInterval(chrom: String, start: u64, end: u64) {
            description("invalid genomic interval")
            display("invalid interval {}:{}-{}; start must be less than end", chrom, start, end)
        }

        InvalidRegion(text: String) {
            description("invalid region")
            display("invalid region {:?}; expected chrom:start-end", text)
        }

        UnknownSequence(chrom: String) {
            description("unknown reference sequence")
            display("reference sequence {:?} not found", chrom)
        }

        InvalidIndexFile(msg: String) {
            description("invalid SNP index file")
            display("invalid SNP index file: {}", msg)
        }
    }
}
