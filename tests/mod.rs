mod smoke_tests;

// Integration suite:
// - smoke_tests: configuration, component lifecycle and command registration
// - ctftime_mock: browsing scenarios against a mocked CTFtime source
