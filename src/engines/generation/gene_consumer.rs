/// Reads codons from a genome on behalf of the mapper, re-reading from the
/// start once the end is reached
pub struct GeneConsumer<'a> {
    genome: &'a [u32],
    used: usize,
}

impl<'a> GeneConsumer<'a> {
    /// `genome` must not be empty
    pub fn new(genome: &'a [u32]) -> Self {
        Self { genome, used: 0 }
    }

    /// Codon under the read head, without consuming it
    pub fn peek(&self) -> u32 {
        self.genome[self.used % self.genome.len()]
    }

    /// Map the current codon to a choice index.
    ///
    /// A codon is only spent when there is an actual choice to make.
    pub fn choose(&mut self, num_choices: usize) -> usize {
        if num_choices == 0 {
            return 0;
        }
        let index = (self.peek() as usize) % num_choices;
        if num_choices > 1 {
            self.used += 1;
        }
        index
    }

    /// True when a positive number of codons has been read and the read head
    /// sits at the start of the genome again
    pub fn at_wrap_boundary(&self) -> bool {
        self.used > 0 && self.used % self.genome.len() == 0
    }

    /// Codons consumed so far, counting every re-read
    pub fn used(&self) -> usize {
        self.used
    }
}
