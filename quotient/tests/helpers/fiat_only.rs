use quotient::QuotientConnector;
use quotient_core::connector::FiatRateProvider;
use quotient_mock::MockConnector;

/// Exposes only the fiat rate role of the fixture mock.
pub struct FiatOnly(pub MockConnector);

impl QuotientConnector for FiatOnly {
    fn name(&self) -> &'static str {
        "fiat-only"
    }

    fn as_fiat_rate_provider(&self) -> Option<&dyn FiatRateProvider> {
        self.0.as_fiat_rate_provider()
    }
}
