use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slide {
    Overview,
    Filters,
    WeekdayAnalysis,
}

impl Slide {
    pub const ALL: [Slide; 3] = [Slide::Overview, Slide::Filters, Slide::WeekdayAnalysis];

    pub fn title(self) -> &'static str {
        match self {
            Slide::Overview => "Overview",
            Slide::Filters => "Advanced Filters",
            Slide::WeekdayAnalysis => "Weekday Analysis",
        }
    }
}

/// Cyclic cursor over a fixed number of slides.
#[derive(Debug, Clone, Serialize)]
pub struct Carousel {
    current: usize,
    slide_count: usize,
}

impl Carousel {
    pub fn new(slide_count: usize) -> Self {
        assert!(slide_count > 0, "carousel needs at least one slide");
        Self {
            current: 0,
            slide_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.slide_count;
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.slide_count - 1) % self.slide_count;
    }

    /// Panics when `index` is out of range; callers validate user input first.
    pub fn jump_to(&mut self, index: usize) {
        assert!(
            index < self.slide_count,
            "slide {index} out of range for {} slides",
            self.slide_count
        );
        self.current = index;
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(Slide::ALL.len())
    }
}
